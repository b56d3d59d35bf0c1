use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

pub const ASSET_URL_PREFIX: &str = "/assets";

pub struct EmbeddedFile {
    pub name: &'static str,
    pub content: &'static str,
    pub content_type: &'static str,
}

fn hashed_name(name: &str, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = format!("{:x}", hasher.finalize());
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin");
    format!("{}.{}", &digest[..12], extension)
}

static STYLESHEET: (&str, &str) = ("site.css", include_str!("./scripts/site.css"));

/// Load order matters: later scripts may use what earlier ones define.
static SCRIPT_ORDER: &[(&str, &str)] = &[
    ("carousel.js", include_str!("./scripts/carousel.js")),
    ("booking.js", include_str!("./scripts/booking.js")),
];

/// Embedded files keyed by their content-hashed file name.
pub static EMBEDDED_FILES: Lazy<HashMap<String, EmbeddedFile>> = Lazy::new(|| {
    let scripts = SCRIPT_ORDER.iter().map(|&(name, content)| {
        (
            hashed_name(name, content),
            EmbeddedFile {
                name,
                content,
                content_type: "application/javascript",
            },
        )
    });
    let stylesheet = std::iter::once((
        hashed_name(STYLESHEET.0, STYLESHEET.1),
        EmbeddedFile {
            name: STYLESHEET.0,
            content: STYLESHEET.1,
            content_type: "text/css",
        },
    ));
    scripts.chain(stylesheet).collect()
});

pub fn stylesheet_url() -> String {
    format!("{}/{}", ASSET_URL_PREFIX, hashed_name(STYLESHEET.0, STYLESHEET.1))
}

pub fn script_tags() -> String {
    SCRIPT_ORDER
        .iter()
        .map(|&(name, content)| {
            format!("<script defer src=\"{}/{}\"></script>\n", ASSET_URL_PREFIX, hashed_name(name, content))
        })
        .collect::<String>()
}

/// Adds the embedded scripts right before `</body>`, or at the end when the
/// document has no body tag.
pub fn inject_scripts(html: &mut String) {
    let tags = script_tags();
    match html.rfind("</body>") {
        Some(body_end_pos) => html.insert_str(body_end_pos, &tags),
        None => html.push_str(&tags),
    }
}
