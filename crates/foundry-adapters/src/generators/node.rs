//! Node.js backend: Express + TypeScript. The registry default.

use async_trait::async_trait;
use tracing::{debug, instrument};

use foundry_core::{
    application::ports::Generator,
    domain::{GeneratorOutput, ProjectConfig, RenderContext},
    error::FoundryResult,
};

use super::common::{Scaffold, assemble, common_files, render_all};

pub const NODE_KEY: &str = "node";

const GITIGNORE: &str = "node_modules/\ndist/\n.env\n*.log\n";
const INSTRUCTIONS: [&str; 2] = ["npm install", "npm run dev"];
const DEPENDENCIES: [(&str, &str); 3] = [
    ("express", "^4.18.2"),
    ("cors", "^2.8.5"),
    ("typescript", "^5.1.6"),
];

const PACKAGE_JSON: &str = r#"{
  "name": "{{ARTIFACT_NAME}}",
  "version": "1.0.0",
  "description": "{{DESCRIPTION}}",
  "main": "dist/index.js",
  "scripts": {
    "build": "tsc",
    "start": "node dist/index.js",
    "dev": "ts-node-dev --respawn src/index.ts"
  },
  "dependencies": {
    "cors": "^2.8.5",
    "express": "^4.18.2"
  },
  "devDependencies": {
    "@types/cors": "^2.8.13",
    "@types/express": "^4.17.17",
    "@types/node": "^20.4.5",
    "ts-node-dev": "^2.0.0",
    "typescript": "^5.1.6"
  }
}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "commonjs",
    "outDir": "dist",
    "rootDir": "src",
    "strict": true,
    "esModuleInterop": true
  }
}
"#;

const INDEX_TS: &str = r#"import express from 'express';
import cors from 'cors';
import { apiRouter } from './routes/api';

const app = express();
const port = process.env.PORT || 3000;

app.use(cors());
app.use(express.json());
app.use('/api', apiRouter);

app.listen(port, () => {
  console.log(`{{PROJECT_NAME}} listening on port ${port}`);
});
"#;

const ROUTES_TS: &str = r#"import { Router } from 'express';
import { getStatus } from '../services/businessLogic';

export const apiRouter = Router();

apiRouter.get('/health', (_req, res) => {
  res.json(getStatus());
});
"#;

const SERVICE_TS: &str = r#"export interface Status {
  service: string;
  status: 'UP' | 'DOWN';
}

export function getStatus(): Status {
  return { service: '{{ARTIFACT_NAME}}', status: 'UP' };
}
"#;

const SCAFFOLD: [Scaffold; 5] = [
    ("package.json", PACKAGE_JSON),
    ("tsconfig.json", TSCONFIG),
    ("src/index.ts", INDEX_TS),
    ("src/routes/api.ts", ROUTES_TS),
    ("src/services/businessLogic.ts", SERVICE_TS),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeGenerator;

impl NodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for NodeGenerator {
    fn key(&self) -> &'static str {
        NODE_KEY
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    async fn generate(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput> {
        let ctx = RenderContext::from_config(config);

        let mut files = common_files(config, &ctx, GITIGNORE, &INSTRUCTIONS);
        files.extend(render_all(&ctx, &SCAFFOLD));
        debug!(files = files.len(), "Node scaffold rendered");

        Ok(assemble(files, &INSTRUCTIONS, &DEPENDENCIES))
    }
}
