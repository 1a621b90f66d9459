//! Link activation for rendered previews.
//!
//! Anchors in rendered markup are never followed in place. The host collects
//! them with [`extract_links`] and hands activations to an [`ExternalOpener`].

use super::escape::strip_tags;
use crate::{Error, Result};
use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;

fn re_anchor() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<a href="([^"]*)"[^>]*>(.*?)</a>"#).expect("anchor pattern")
    })
}

/// An anchor found in rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLink {
    /// Decoded `href` value, ready to hand to an opener.
    pub href: String,
    /// Visible text of the anchor with inner tags removed.
    pub text: String,
}

fn decode_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Returns every anchor in document order. Images are not links and are skipped.
pub fn extract_links(html: &str) -> Vec<RenderedLink> {
    re_anchor()
        .captures_iter(html)
        .map(|caps| RenderedLink {
            href: decode_attr(&caps[1]),
            text: strip_tags(&caps[2]),
        })
        .collect()
}

/// Capability to open a URL outside the preview surface.
pub trait ExternalOpener {
    fn open_external(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

fn launcher(url: &str) -> Option<Command> {
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        return Some(command);
    }
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        return Some(command);
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        return Some(command);
    }
    #[allow(unreachable_code)]
    {
        let _ = url;
        None
    }
}

impl ExternalOpener for SystemOpener {
    fn open_external(&self, url: &str) -> Result<()> {
        let mut command = launcher(url)
            .ok_or_else(|| Error::Open(format!("{url}: no launcher for this platform")))?;
        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Open(format!("{url}: launcher exited with {status}")))
        }
    }
}

/// Forwards anchor activations to an [`ExternalOpener`].
pub struct LinkActivationHandler<O: ExternalOpener> {
    opener: O,
}

impl<O: ExternalOpener> LinkActivationHandler<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    /// Opens `href` externally. Returns `Ok(false)` for inert targets
    /// (empty or `#`), which are swallowed.
    pub fn activate(&self, href: &str) -> Result<bool> {
        let href = href.trim();
        if href.is_empty() || href == "#" {
            tracing::debug!("ignoring inert link activation");
            return Ok(false);
        }
        tracing::info!(url = href, "opening link externally");
        self.opener.open_external(href)?;
        Ok(true)
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }
}
