pub mod escape;
mod links;

pub use escape::{escape_html, escape_html_attr, restore_safe_tags, sanitize_link_url};
pub use links::{
    extract_links, ExternalOpener, LinkActivationHandler, RenderedLink, SystemOpener,
};

/// Turns editor text into display markup.
pub trait Renderer {
    fn render(&self, source: &str) -> String;
}
