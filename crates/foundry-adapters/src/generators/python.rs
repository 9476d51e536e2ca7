//! Python backend: FastAPI served by uvicorn.

use async_trait::async_trait;
use tracing::{debug, instrument};

use foundry_core::{
    application::ports::Generator,
    domain::{GeneratorOutput, ProjectConfig, RenderContext},
    error::FoundryResult,
};

use super::common::{Scaffold, assemble, common_files, render_all};

pub const PYTHON_KEY: &str = "python";

const GITIGNORE: &str = "__pycache__/\n*.py[cod]\n.venv/\nvenv/\n.env\n";
const INSTRUCTIONS: [&str; 2] = [
    "pip install -r requirements.txt",
    "uvicorn app.main:app --reload",
];
const DEPENDENCIES: [(&str, &str); 3] = [
    ("fastapi", "0.100.0"),
    ("uvicorn", "0.23.1"),
    ("pydantic", "2.1.1"),
];

const REQUIREMENTS_TXT: &str = "fastapi==0.100.0
uvicorn==0.23.1
pydantic==2.1.1
";

const MAIN_PY: &str = r#"from fastapi import FastAPI

from app.routes.health import router as health_router

app = FastAPI(title="{{PROJECT_NAME}}", description="{{DESCRIPTION}}")
app.include_router(health_router)
"#;

const ROUTES_PY: &str = r#"from fastapi import APIRouter

from app.services.status_service import get_status

router = APIRouter()


@router.get("/health")
def health():
    return get_status()
"#;

const SERVICE_PY: &str = r#"def get_status() -> dict:
    return {"service": "{{PROJECT_NAME_SNAKE}}", "status": "UP"}
"#;

const SCAFFOLD: [Scaffold; 7] = [
    ("requirements.txt", REQUIREMENTS_TXT),
    ("app/__init__.py", ""),
    ("app/main.py", MAIN_PY),
    ("app/routes/__init__.py", ""),
    ("app/routes/health.py", ROUTES_PY),
    ("app/services/__init__.py", ""),
    ("app/services/status_service.py", SERVICE_PY),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonGenerator;

impl PythonGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for PythonGenerator {
    fn key(&self) -> &'static str {
        PYTHON_KEY
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    async fn generate(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput> {
        let ctx = RenderContext::from_config(config);

        let mut files = common_files(config, &ctx, GITIGNORE, &INSTRUCTIONS);
        files.extend(render_all(&ctx, &SCAFFOLD));
        debug!(files = files.len(), "Python scaffold rendered");

        Ok(assemble(files, &INSTRUCTIONS, &DEPENDENCIES))
    }
}
