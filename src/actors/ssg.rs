use crate::actors::page_renderer::{PageRendererActor, RenderPage};
use crate::session::WizardSnapshot;
use crate::static_assets;
use crate::view::{PageQuery, PageView, SiteSettings};
use actix::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Message)]
#[rtype(result = "io::Result<PathBuf>")]
pub struct BuildSite {
    pub output_path: PathBuf,
    /// Directory copied next to the page under `settings.static_prefix`.
    pub static_path: Option<PathBuf>,
}

/// Writes the brochure page, its embedded assets and the static directory
/// into a folder that any file server can host. The booking form still
/// needs the server to accept submissions.
pub struct SsgActor {
    renderer: Addr<PageRendererActor>,
    settings: SiteSettings,
}

impl SsgActor {
    pub fn new(renderer: Addr<PageRendererActor>, settings: SiteSettings) -> Self {
        Self { renderer, settings }
    }
}

impl Actor for SsgActor {
    type Context = Context<Self>;
}

fn copy_dir_all(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(&dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        if ty.is_dir() {
            copy_dir_all(entry.path(), dst.as_ref().join(entry.file_name()))?;
        } else {
            fs::copy(entry.path(), dst.as_ref().join(entry.file_name()))?;
        }
    }
    Ok(())
}

impl Handler<BuildSite> for SsgActor {
    type Result = ResponseFuture<io::Result<PathBuf>>;

    fn handle(&mut self, msg: BuildSite, _ctx: &mut Context<Self>) -> Self::Result {
        let renderer = self.renderer.clone();
        let settings = self.settings.clone();
        Box::pin(async move {
            log::info!("Static site generation started. Output path: {:?}", msg.output_path);

            if msg.output_path.exists() {
                fs::remove_dir_all(&msg.output_path)?;
            }
            fs::create_dir_all(&msg.output_path)?;

            let view = PageView::build(&WizardSnapshot::default(), &PageQuery::default(), &settings);
            let html = renderer
                .send(RenderPage { view })
                .await
                .map_err(io::Error::other)?
                .map_err(|e| io::Error::other(e.to_string()))?;

            let index_path = msg.output_path.join("index.html");
            fs::write(&index_path, html)?;
            log::info!("Saved page to: {:?}", index_path);

            if let Some(static_path) = &msg.static_path {
                if static_path.exists() {
                    log::info!("Copying static files from: {:?}", static_path);
                    let relative = settings.static_prefix.trim_start_matches('/');
                    let output_static_path = if relative.is_empty() {
                        msg.output_path.clone()
                    } else {
                        msg.output_path.join(relative)
                    };
                    copy_dir_all(static_path, output_static_path)?;
                    log::info!("Static files copied.");
                } else {
                    log::warn!("Static directory {:?} does not exist, skipping.", static_path);
                }
            }

            let assets_path = msg
                .output_path
                .join(static_assets::ASSET_URL_PREFIX.trim_start_matches('/'));
            fs::create_dir_all(&assets_path)?;
            for (hash, file) in static_assets::EMBEDDED_FILES.iter() {
                fs::write(assets_path.join(hash), file.content)?;
                log::debug!("Wrote {} as {}", file.name, hash);
            }

            log::info!("Static site generation finished successfully.");
            Ok(index_path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::health::HealthActor;
    use crate::actors::template_renderer::{TemplateRendererActor, shared_environment};
    use tempfile::tempdir;

    fn start_ssg() -> Addr<SsgActor> {
        let health = HealthActor::new().start();
        let env = shared_environment().unwrap();
        let templates = SyncArbiter::start(1, move || TemplateRendererActor::new(env.clone(), false));
        let renderer = PageRendererActor::new(templates, health).start();
        SsgActor::new(renderer, SiteSettings::default()).start()
    }

    #[actix_rt::test]
    async fn test_builds_index_assets_and_static_files() {
        let source = tempdir().unwrap();
        fs::create_dir_all(source.path().join("Images")).unwrap();
        fs::write(source.path().join("Images/hero.jpg"), b"jpeg").unwrap();

        let out = tempdir().unwrap();
        let output_path = out.path().join("dist");
        fs::create_dir_all(&output_path).unwrap();
        fs::write(output_path.join("stale.html"), "old").unwrap();

        let index = start_ssg()
            .send(BuildSite {
                output_path: output_path.clone(),
                static_path: Some(source.path().to_path_buf()),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(index, output_path.join("index.html"));
        let html = fs::read_to_string(&index).unwrap();
        assert!(html.contains("Book Your Safari Adventure"));
        assert!(!output_path.join("stale.html").exists());
        assert_eq!(fs::read(output_path.join("static/Images/hero.jpg")).unwrap(), b"jpeg");

        for hash in static_assets::EMBEDDED_FILES.keys() {
            assert!(output_path.join("assets").join(hash).exists(), "{} not written", hash);
        }
    }

    #[actix_rt::test]
    async fn test_missing_static_dir_is_skipped() {
        let out = tempdir().unwrap();
        let output_path = out.path().join("site");
        let result = start_ssg()
            .send(BuildSite {
                output_path: output_path.clone(),
                static_path: Some(out.path().join("nope")),
            })
            .await
            .unwrap();
        assert!(result.is_ok());
        assert!(output_path.join("index.html").exists());
    }
}
