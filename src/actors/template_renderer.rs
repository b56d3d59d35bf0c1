use crate::errors::DetailedError;
use crate::static_assets;
use crate::templates;
use crate::view::PageView;
use actix::prelude::*;
use minijinja::Environment;
use std::sync::Arc;

/// Renders page templates on a dedicated thread pool.
pub struct TemplateRendererActor {
    env: Arc<Environment<'static>>,
    dev_mode: bool,
}

impl TemplateRendererActor {
    pub fn new(env: Arc<Environment<'static>>, dev_mode: bool) -> Self {
        Self { env, dev_mode }
    }
}

impl Actor for TemplateRendererActor {
    type Context = SyncContext<Self>;
}

#[derive(Message)]
#[rtype(result = "Result<String, DetailedError>")]
pub struct RenderTemplate {
    pub template_name: &'static str,
    pub view: PageView,
}

impl Handler<RenderTemplate> for TemplateRendererActor {
    type Result = Result<String, DetailedError>;

    fn handle(&mut self, msg: RenderTemplate, _ctx: &mut Self::Context) -> Self::Result {
        let start_time = std::time::Instant::now();
        let tmpl = self.env.get_template(msg.template_name)?;
        let mut rendered = tmpl.render(&msg.view)?;
        static_assets::inject_scripts(&mut rendered);

        if self.dev_mode {
            log::debug!(
                "Rendered {} in {:.2}ms",
                msg.template_name,
                start_time.elapsed().as_secs_f64() * 1000.0
            );
        }
        Ok(rendered)
    }
}

/// Builds the shared template environment, logging the failing template when
/// one does not compile.
pub fn shared_environment() -> Result<Arc<Environment<'static>>, DetailedError> {
    templates::build_environment().map(Arc::new).map_err(|e| {
        let detailed = DetailedError::from(e);
        templates::log_detailed_error(&detailed);
        detailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::WizardSnapshot;
    use crate::view::{PageQuery, SiteSettings};

    #[actix_rt::test]
    async fn test_renders_full_page_with_scripts() {
        let env = shared_environment().unwrap();
        let addr = SyncArbiter::start(1, move || TemplateRendererActor::new(env.clone(), false));

        let view = PageView::build(&WizardSnapshot::default(), &PageQuery::default(), &SiteSettings::default());
        let html = addr
            .send(RenderTemplate {
                template_name: "page.html",
                view,
            })
            .await
            .unwrap()
            .unwrap();

        assert!(html.contains("Popular Destinations"));
        assert!(html.contains("Personal Information"));
        assert!(html.contains("data-autoplay=\"5000\""));
        let script_pos = html.find("<script defer").unwrap();
        assert!(script_pos < html.rfind("</body>").unwrap());
    }

    #[actix_rt::test]
    async fn test_unknown_template_is_a_detailed_error() {
        let env = shared_environment().unwrap();
        let addr = SyncArbiter::start(1, move || TemplateRendererActor::new(env.clone(), true));

        let view = PageView::build(&WizardSnapshot::default(), &PageQuery::default(), &SiteSettings::default());
        let err = addr
            .send(RenderTemplate {
                template_name: "missing.html",
                view,
            })
            .await
            .unwrap()
            .unwrap_err();
        assert!(err.message.contains("missing.html"));
    }
}
