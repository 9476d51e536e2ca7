//! Java backend: Spring Boot 3 on Maven.

use async_trait::async_trait;
use tracing::{debug, instrument};

use foundry_core::{
    application::ports::Generator,
    domain::{GeneratorOutput, ProjectConfig, RenderContext},
    error::FoundryResult,
};

use super::common::{Scaffold, assemble, common_files, render_all};

pub const JAVA_KEY: &str = "java";

/// Root package of every generated Java project.
pub const BASE_PACKAGE: &str = "com.company.app";
const SPRING_BOOT_VERSION: &str = "3.1.2";

const GITIGNORE: &str = "target/\n*.class\n.idea/\n*.iml\n.env\n";
const INSTRUCTIONS: [&str; 1] = ["mvn spring-boot:run"];
const DEPENDENCIES: [(&str, &str); 1] = [("spring-boot-starter-web", SPRING_BOOT_VERSION)];

const POM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>{{SPRING_BOOT_VERSION}}</version>
        <relativePath/>
    </parent>
    <groupId>com.company</groupId>
    <artifactId>{{ARTIFACT_NAME}}</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <name>{{PROJECT_NAME}}</name>
    <description>{{DESCRIPTION}}</description>
    <properties>
        <java.version>17</java.version>
    </properties>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-test</artifactId>
            <scope>test</scope>
        </dependency>
        <dependency>
            <groupId>org.projectlombok</groupId>
            <artifactId>lombok</artifactId>
            <optional>true</optional>
        </dependency>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

const APPLICATION_JAVA: &str = r#"package {{PACKAGE}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class Application {

    public static void main(String[] args) {
        SpringApplication.run(Application.class, args);
    }
}
"#;

const APPLICATION_YML: &str = "server:
  port: 8080

spring:
  application:
    name: {{PROJECT_NAME}}
";

const CONTROLLER_JAVA: &str = r#"package {{PACKAGE}}.controller;

import java.util.Map;

import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.RestController;

@RestController
public class HealthController {

    @GetMapping("/health")
    public Map<String, String> health() {
        return Map.of("status", "UP");
    }
}
"#;

const SERVICE_JAVA: &str = r#"package {{PACKAGE}}.service;

import org.springframework.stereotype.Service;

@Service
public class ExampleService {

    public String getGreeting() {
        return "Hello from {{PROJECT_NAME}}!";
    }
}
"#;

const SCAFFOLD: [Scaffold; 5] = [
    ("pom.xml", POM_XML),
    ("src/main/java/com/company/app/Application.java", APPLICATION_JAVA),
    ("src/main/resources/application.yml", APPLICATION_YML),
    (
        "src/main/java/com/company/app/controller/HealthController.java",
        CONTROLLER_JAVA,
    ),
    (
        "src/main/java/com/company/app/service/ExampleService.java",
        SERVICE_JAVA,
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaGenerator;

impl JavaGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for JavaGenerator {
    fn key(&self) -> &'static str {
        JAVA_KEY
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    async fn generate(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput> {
        let ctx = RenderContext::from_config(config)
            .with_variable("PACKAGE", BASE_PACKAGE)
            .with_variable("SPRING_BOOT_VERSION", SPRING_BOOT_VERSION);

        let mut files = common_files(config, &ctx, GITIGNORE, &INSTRUCTIONS);
        files.extend(render_all(&ctx, &SCAFFOLD));
        debug!(files = files.len(), package = BASE_PACKAGE, "Java scaffold rendered");

        Ok(assemble(files, &INSTRUCTIONS, &DEPENDENCIES))
    }
}
