//! Generic page helpers
//!
//! Everything here is application-agnostic: waits, probes, clicks, typing,
//! text extraction and the drag gesture. Boolean helpers (`is_visible`,
//! `cell_texts`, `count`) swallow automation errors and return the empty
//! answer, because existence checks treat "absent" and "unreadable" the
//! same; action helpers propagate the underlying error unmodified.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::probe::{poll, Probe};

/// Options for [`BasePage::type_into`].
#[derive(Debug, Clone, Copy)]
pub struct TypeOptions {
    /// Clear the field before typing
    pub clear_first: bool,
    /// Press Enter after typing
    pub press_enter: bool,
    /// Delay between keystrokes
    pub delay: Option<Duration>,
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self {
            clear_first: true,
            press_enter: false,
            delay: None,
        }
    }
}

#[derive(Clone)]
pub struct BasePage {
    page: Page,
    config: SuiteConfig,
}

impl BasePage {
    pub fn new(page: Page, config: SuiteConfig) -> Self {
        Self { page, config }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Poll for `selector` to be present with a non-empty box.
    pub async fn probe_visible(&self, selector: &str, timeout: Duration) -> SuiteResult<Probe<()>> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             return r.width > 0 && r.height > 0; }})()",
            sel = js_string(selector)?
        );
        Ok(poll(timeout, self.config.poll_interval(), || async {
            let visible = self
                .page
                .evaluate(script.as_str())
                .await?
                .into_value::<bool>()?;
            Ok(visible.then_some(()))
        })
        .await)
    }

    /// Boolean existence check; all non-found probe outcomes collapse to
    /// `false` here.
    pub async fn is_visible(&self, selector: &str) -> bool {
        self.probe_visible(selector, self.config.probe_timeout())
            .await
            .map(|probe| probe.is_found())
            .unwrap_or(false)
    }

    /// Wait for `selector` to become visible and return the element.
    pub async fn wait_visible(&self, selector: &str, timeout: Duration) -> SuiteResult<Element> {
        match self.probe_visible(selector, timeout).await? {
            Probe::Found(()) => Ok(self.page.find_element(selector).await?),
            Probe::NotFound | Probe::TimedOut => Err(SuiteError::WaitTimeout {
                what: format!("{selector} to become visible"),
                waited_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Wait for `selector` to be attached to the DOM (visible or not).
    pub async fn wait_attached(&self, selector: &str) -> SuiteResult<Element> {
        let timeout = self.config.attach_timeout();
        poll(timeout, self.config.poll_interval(), || async {
            match self.page.find_element(selector).await {
                Ok(element) => Ok(Some(element)),
                Err(_) => Ok(None),
            }
        })
        .await
        .into_found()
        .ok_or_else(|| SuiteError::WaitTimeout {
            what: format!("{selector} to attach"),
            waited_ms: timeout.as_millis() as u64,
        })
    }

    /// Wait for visibility, then click.
    pub async fn click(&self, selector: &str) -> SuiteResult<()> {
        let element = self
            .wait_visible(selector, self.config.action_timeout())
            .await?;
        element.click().await?;
        Ok(())
    }

    /// Type `text` into the field at `selector` with real key events.
    pub async fn type_into(
        &self,
        selector: &str,
        text: &str,
        options: TypeOptions,
    ) -> SuiteResult<()> {
        let element = self
            .wait_visible(selector, self.config.action_timeout())
            .await?;
        if options.clear_first {
            self.clear_input(selector).await?;
        }
        element.click().await?;
        let text = text.trim();
        match options.delay {
            Some(delay) if !delay.is_zero() => {
                for ch in text.chars() {
                    element.type_str(ch.to_string()).await?;
                    tokio::time::sleep(delay).await;
                }
            }
            _ => {
                element.type_str(text).await?;
            }
        }
        if options.press_enter {
            element.press_key("Enter").await?;
        }
        Ok(())
    }

    /// Empty the field at `selector` and notify the app.
    pub async fn clear_input(&self, selector: &str) -> SuiteResult<()> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             el.value = ''; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             return true; }})()",
            sel = js_string(selector)?
        );
        self.page.evaluate(script).await?;
        Ok(())
    }

    /// Trimmed texts of `row`'s children matching `selector`; errors yield
    /// an empty list.
    pub async fn cell_texts(&self, row: &Element, selector: &str) -> Vec<String> {
        let Ok(cells) = row.find_elements(selector).await else {
            return Vec::new();
        };
        let mut texts = Vec::with_capacity(cells.len());
        for cell in &cells {
            texts.push(element_text(cell).await);
        }
        texts
    }

    /// Number of elements matching `selector`; errors count as zero.
    pub async fn count(&self, selector: &str) -> usize {
        self.page
            .find_elements(selector)
            .await
            .map(|elements| elements.len())
            .unwrap_or(0)
    }

    /// Whether the element at `selector` is disabled, directly or through a
    /// disabled ancestor. A missing element counts as disabled.
    pub async fn is_disabled(&self, selector: &str) -> SuiteResult<bool> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return true; \
             return el.matches('[disabled], [aria-disabled=\"true\"], .k-disabled') \
                 || el.closest('.k-disabled') !== null; }})()",
            sel = js_string(selector)?
        );
        Ok(self.page.evaluate(script).await?.into_value()?)
    }

    /// Drag `source` onto `target` with raw pointer events: press on the
    /// source, move to the target center, pause so the drop zone registers
    /// the gesture, release, pause again. The pauses are a heuristic for
    /// the grid's drag handling, not a correctness guarantee.
    pub async fn drag_and_drop(&self, source: &Element, target: &Element) -> SuiteResult<()> {
        target.scroll_into_view().await?;
        let from = source.clickable_point().await?;
        let to = target.clickable_point().await?;
        let pause = self.config.drag_pause();

        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, from.x, from.y, 0)
            .await?;
        self.dispatch_mouse(DispatchMouseEventType::MousePressed, from.x, from.y, 1)
            .await?;
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, to.x, to.y, 0)
            .await?;
        tokio::time::sleep(pause).await;
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, to.x, to.y, 0)
            .await?;
        self.dispatch_mouse(DispatchMouseEventType::MouseReleased, to.x, to.y, 1)
            .await?;
        tokio::time::sleep(pause).await;
        Ok(())
    }

    async fn dispatch_mouse(
        &self,
        kind: DispatchMouseEventType,
        x: f64,
        y: f64,
        click_count: i64,
    ) -> SuiteResult<()> {
        let mut builder = DispatchMouseEventParams::builder()
            .r#type(kind)
            .x(x)
            .y(y)
            .button(MouseButton::Left);
        if click_count > 0 {
            builder = builder.click_count(click_count);
        }
        let params = builder.build().map_err(SuiteError::Command)?;
        self.page.execute(params).await?;
        Ok(())
    }
}

async fn element_text(element: &Element) -> String {
    match element.inner_text().await {
        Ok(Some(text)) => text.trim().to_string(),
        _ => String::new(),
    }
}

/// Quote a Rust string as a JS string literal.
pub(crate) fn js_string(value: &str) -> SuiteResult<String> {
    Ok(serde_json::to_string(value)?)
}
