use crate::actors::health::{HealthActor, ReportRenderLatency};
use crate::actors::template_renderer::{RenderTemplate, TemplateRendererActor};
use crate::errors::DetailedError;
use crate::view::PageView;
use actix::prelude::*;
use actix_web::rt::time::timeout;
use std::time::Duration;

const RENDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Front door for page rendering: bounds each render with a timeout and
/// reports how long it took.
pub struct PageRendererActor {
    template_renderer: Addr<TemplateRendererActor>,
    health_actor: Addr<HealthActor>,
}

impl PageRendererActor {
    pub fn new(template_renderer: Addr<TemplateRendererActor>, health_actor: Addr<HealthActor>) -> Self {
        Self {
            template_renderer,
            health_actor,
        }
    }
}

impl Actor for PageRendererActor {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Result<String, DetailedError>")]
pub struct RenderPage {
    pub view: PageView,
}

impl Handler<RenderPage> for PageRendererActor {
    type Result = ResponseFuture<Result<String, DetailedError>>;

    fn handle(&mut self, msg: RenderPage, _ctx: &mut Context<Self>) -> Self::Result {
        let template_renderer = self.template_renderer.clone();
        let health_actor = self.health_actor.clone();
        Box::pin(async move {
            let render_msg = RenderTemplate {
                template_name: "page.html",
                view: msg.view,
            };

            let start_time = std::time::Instant::now();
            let result = timeout(RENDER_TIMEOUT, template_renderer.send(render_msg)).await;
            let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
            health_actor.do_send(ReportRenderLatency(duration_ms));

            match result {
                Ok(Ok(Ok(rendered))) => Ok(rendered),
                Ok(Ok(Err(e))) => {
                    log::error!("Error rendering page: {}", e);
                    Err(e)
                }
                Ok(Err(e)) => {
                    log::error!("Mailbox error: {}", e);
                    Err(DetailedError::internal(format!("Template renderer unavailable: {}", e)))
                }
                Err(_) => {
                    log::error!("Timeout error waiting for template renderer");
                    Err(DetailedError::internal("Timeout waiting for template renderer"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::health::GetSystemHealth;
    use crate::actors::template_renderer::shared_environment;
    use crate::session::WizardSnapshot;
    use crate::view::{PageQuery, SiteSettings};

    #[actix_rt::test]
    async fn test_render_reports_latency() {
        let health = HealthActor::new().start();
        let env = shared_environment().unwrap();
        let templates = SyncArbiter::start(1, move || TemplateRendererActor::new(env.clone(), false));
        let renderer = PageRendererActor::new(templates, health.clone()).start();

        let view = PageView::build(&WizardSnapshot::default(), &PageQuery::default(), &SiteSettings::default());
        let html = renderer.send(RenderPage { view }).await.unwrap().unwrap();
        assert!(html.contains("Book Your Safari Adventure"));

        let report = health.send(GetSystemHealth).await.unwrap();
        assert_eq!(report.thirty_seconds.page_renderer.samples, 1);
    }
}
