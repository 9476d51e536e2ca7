//! Frontend SPA: React + TypeScript on Vite.

use async_trait::async_trait;
use tracing::{debug, instrument};

use foundry_core::{
    application::ports::Generator,
    domain::{FRONTEND_LANGUAGE, GeneratorOutput, ProjectConfig, RenderContext},
    error::FoundryResult,
};

use super::common::{Scaffold, assemble, common_files, render_all};

const GITIGNORE: &str = "node_modules/\ndist/\n.env.local\n*.log\n";
const INSTRUCTIONS: [&str; 2] = ["npm install", "npm run dev"];
const DEPENDENCIES: [(&str, &str); 4] = [
    ("react", "^18.2.0"),
    ("react-dom", "^18.2.0"),
    ("react-router-dom", "^6.14.2"),
    ("vite", "^4.4.5"),
];

const PACKAGE_JSON: &str = r#"{
  "name": "{{ARTIFACT_NAME}}",
  "private": true,
  "version": "0.1.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "tsc && vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "react-router-dom": "^6.14.2"
  },
  "devDependencies": {
    "@types/react": "^18.2.15",
    "@types/react-dom": "^18.2.7",
    "@vitejs/plugin-react": "^4.0.3",
    "typescript": "^5.0.2",
    "vite": "^4.4.5"
  }
}
"#;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{{PROJECT_NAME}}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#;

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
"#;

const MAIN_TSX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import { BrowserRouter } from 'react-router-dom';
import { AppRoutes } from './routes/AppRoutes';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <BrowserRouter>
      <AppRoutes />
    </BrowserRouter>
  </React.StrictMode>,
);
"#;

const ROUTES_TSX: &str = r#"import { Route, Routes } from 'react-router-dom';
import App from '../App';

export function AppRoutes() {
  return (
    <Routes>
      <Route path="/" element={<App />} />
    </Routes>
  );
}
"#;

const APP_TSX: &str = r#"export default function App() {
  return (
    <main>
      <h1>{{PROJECT_NAME}}</h1>
      <p>{{DESCRIPTION}}</p>
    </main>
  );
}
"#;

const SERVICE_TS: &str = r#"const BASE_URL = import.meta.env.VITE_API_URL ?? '/api';

export async function fetchHealth(): Promise<{ status: string }> {
  const response = await fetch(`${BASE_URL}/health`);
  return response.json();
}
"#;

const SCAFFOLD: [Scaffold; 7] = [
    ("package.json", PACKAGE_JSON),
    ("index.html", INDEX_HTML),
    ("vite.config.ts", VITE_CONFIG),
    ("src/main.tsx", MAIN_TSX),
    ("src/App.tsx", APP_TSX),
    ("src/routes/AppRoutes.tsx", ROUTES_TSX),
    ("src/services/api.ts", SERVICE_TS),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FrontendGenerator;

impl FrontendGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for FrontendGenerator {
    fn key(&self) -> &'static str {
        FRONTEND_LANGUAGE
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    async fn generate(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput> {
        let ctx = RenderContext::from_config(config);

        let mut files = common_files(config, &ctx, GITIGNORE, &INSTRUCTIONS);
        files.extend(render_all(&ctx, &SCAFFOLD));
        debug!(files = files.len(), "Frontend scaffold rendered");

        Ok(assemble(files, &INSTRUCTIONS, &DEPENDENCIES))
    }
}
