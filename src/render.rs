//! Renderer adapter – hands finished markup to an external engine that
//! produces the paginated artifact.
//!
//! [`Renderer`] is the seam; [`ChromeRenderer`] is the production
//! implementation, driving headless Chromium over CDP with `chromiumoxide`.

use std::path::PathBuf;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;

use crate::error::{Error, Result};

/// Everything the engine needs to print one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderJob<'a> {
    pub markup: &'a str,
    pub width_in: f64,
    pub height_in: f64,
    pub print_background: bool,
}

/// An external engine turning markup into a paginated artifact.
///
/// Implementations are called exactly once per export and are not retried;
/// any failure should surface as [`Error::Renderer`].
#[allow(async_fn_in_trait)]
pub trait Renderer {
    async fn render(&self, job: &RenderJob<'_>) -> Result<Vec<u8>>;
}

/// Launch settings for [`ChromeRenderer`].
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Browser binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Run with the Chromium sandbox (default: true). Containers usually
    /// need this off.
    pub sandbox: bool,
    /// Extra command-line switches.
    pub args: Vec<String>,
    /// Paint backgrounds and fills (default: true). When off, backgrounds
    /// are skipped even for jobs that ask for them.
    pub print_background: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            executable: None,
            sandbox: true,
            args: vec!["--disable-gpu".to_string(), "--hide-scrollbars".to_string()],
            print_background: true,
        }
    }
}

/// Prints markup to PDF in a headless Chromium launched per call.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    config: ChromeConfig,
}

impl ChromeRenderer {
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder();
        if let Some(path) = &self.config.executable {
            builder = builder.chrome_executable(path);
        }
        if !self.config.sandbox {
            builder = builder.no_sandbox();
        }
        for arg in &self.config.args {
            builder = builder.arg(arg.as_str());
        }
        builder
            .build()
            .map_err(|e| Error::Renderer(format!("browser config error: {e}")))
    }

    async fn print(&self, browser: &Browser, job: &RenderJob<'_>) -> Result<Vec<u8>> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(renderer_error)?;
        page.set_content(job.markup).await.map_err(renderer_error)?;
        page.pdf(self.pdf_params(job)).await.map_err(renderer_error)
    }

    /// Paper sized to the page, no margins, CSS `@page` size preferred.
    fn pdf_params(&self, job: &RenderJob<'_>) -> PrintToPdfParams {
        PrintToPdfParams {
            print_background: Some(job.print_background && self.config.print_background),
            paper_width: Some(job.width_in),
            paper_height: Some(job.height_in),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            prefer_css_page_size: Some(true),
            ..PrintToPdfParams::default()
        }
    }
}

impl Renderer for ChromeRenderer {
    async fn render(&self, job: &RenderJob<'_>) -> Result<Vec<u8>> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(renderer_error)?;
        log::debug!("browser launched");

        let events = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("browser event error: {e}");
                    break;
                }
            }
        });

        let result = self.print(&browser, job).await;

        // Released on every path, including a failed print.
        if let Err(e) = browser.close().await {
            log::warn!("failed to close browser: {e}");
        }
        if let Err(e) = browser.wait().await {
            log::warn!("failed to reap browser process: {e}");
        }
        events.abort();

        let bytes = result?;
        log::info!(
            "rendered {} bytes at {}in x {}in",
            bytes.len(),
            job.width_in,
            job.height_in
        );
        Ok(bytes)
    }
}

fn renderer_error(e: impl std::fmt::Display) -> Error {
    Error::Renderer(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_prints_backgrounds() {
        let config = ChromeConfig::default();
        assert!(config.print_background);
        assert!(config.sandbox);
        assert!(config.executable.is_none());
    }

    #[test]
    fn pdf_params_match_page() {
        let job = RenderJob {
            markup: "<!DOCTYPE html><html></html>",
            width_in: 10.0,
            height_in: 5.625,
            print_background: true,
        };
        let params = ChromeRenderer::default().pdf_params(&job);
        assert_eq!(params.paper_width, Some(10.0));
        assert_eq!(params.paper_height, Some(5.625));
        assert_eq!(params.margin_left, Some(0.0));
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.prefer_css_page_size, Some(true));
    }

    #[test]
    fn config_can_turn_backgrounds_off() {
        let job = RenderJob {
            markup: "<!DOCTYPE html><html></html>",
            width_in: 10.0,
            height_in: 5.625,
            print_background: true,
        };
        let renderer = ChromeRenderer::new(ChromeConfig {
            print_background: false,
            ..ChromeConfig::default()
        });
        assert_eq!(renderer.pdf_params(&job).print_background, Some(false));

        let job = RenderJob {
            print_background: false,
            ..job
        };
        let params = ChromeRenderer::default().pdf_params(&job);
        assert_eq!(params.print_background, Some(false));
    }

    #[test]
    fn renderer_errors_keep_message() {
        let err = renderer_error("Could not auto detect a chrome executable");
        assert_eq!(
            err.to_string(),
            "Renderer failure: Could not auto detect a chrome executable"
        );
    }
}
