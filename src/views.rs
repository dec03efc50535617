use std::sync::Arc;

use minijinja::{context, Environment};

use crate::error::Result;
use crate::services::status_service::StatusPage;

const HOME_TEMPLATE: &str = "index.html";

#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(HOME_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render_home(&self, page: &StatusPage) -> Result<String> {
        let template = self.env.get_template(HOME_TEMPLATE)?;
        let html = template.render(context! {
            newest => &page.newest,
            other_updates => &page.other_updates,
        })?;
        Ok(html)
    }
}
