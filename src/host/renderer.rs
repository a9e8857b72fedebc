use crate::foundation::error::{RailyardError, RailyardResult};
use crate::host::container::{ChildId, Container, Element};
use crate::host::options::RenderOptions;
use crate::render::progress::ProgressSink;
use crate::session::{self, RenderOutcome, Session, SessionState};

/// Class marking a mounted container.
pub const CONTAINER_CLASS: &str = "svg-container";
/// Class present from parse start until the session is terminal.
pub const LOADING_CLASS: &str = "loading";

/// A container prepared to receive a diagram.
#[derive(Debug)]
pub struct Mount<C> {
    container: C,
    diagram: ChildId,
    progress: Option<ChildId>,
    options: RenderOptions,
}

impl<C: Container> Mount<C> {
    /// The mounted container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Options the container was mounted with.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Whether the progress indicator is still attached.
    pub fn has_progress(&self) -> bool {
        self.progress.is_some()
    }

    /// Release the container.
    pub fn into_container(self) -> C {
        self.container
    }

    fn clear_loading(&mut self) -> RailyardResult<()> {
        self.container.remove_class(LOADING_CLASS);
        if let Some(id) = self.progress.take() {
            self.container.remove_child(id)?;
            tracing::debug!("progress indicator removed");
        }
        Ok(())
    }
}

/// Mount `container`: replace (or, with `keep_content`, keep after the diagram) its content with
/// a diagram slot and a progress indicator.
pub fn attach_container<C: Container>(
    mut container: C,
    options: RenderOptions,
) -> RailyardResult<Mount<C>> {
    if container.has_class(CONTAINER_CLASS) {
        return Err(RailyardError::validation("container is already mounted"));
    }
    let previous = container.take_children();
    let diagram = container.append_child(Element::Diagram(None));
    let progress = container.append_child(Element::Progress { percent: 0.0 });
    if options.keep_content {
        for child in previous {
            container.append_child(child);
        }
    }
    container.add_class(CONTAINER_CLASS);
    Ok(Mount {
        container,
        diagram,
        progress: Some(progress),
        options,
    })
}

/// Mirrors progress into the indicator and clears the loading state exactly once.
struct LoadingIndicator<'a, C: Container> {
    mount: &'a mut Mount<C>,
    sink: &'a mut dyn ProgressSink,
}

impl<C: Container> LoadingIndicator<'_, C> {
    fn finish(self) -> RailyardResult<()> {
        self.mount.clear_loading()
    }
}

impl<C: Container> ProgressSink for LoadingIndicator<'_, C> {
    fn progress(&mut self, fraction: f64) {
        if let Some(id) = self.mount.progress
            && let Ok(el) = self.mount.container.child_mut(id)
        {
            *el = Element::Progress {
                percent: fraction * 100.0,
            };
        }
        self.sink.progress(fraction);
    }
}

impl<C: Container> Drop for LoadingIndicator<'_, C> {
    fn drop(&mut self) {
        if let Err(err) = self.mount.clear_loading() {
            tracing::warn!(%err, "failed to clear loading state");
        }
    }
}

/// Host-facing front object: one mounted container, any number of sequential sessions.
#[derive(Debug)]
pub struct Renderer<C> {
    mount: Mount<C>,
}

impl<C: Container> Renderer<C> {
    /// Mount `container` and wrap it.
    pub fn attach(container: C, options: RenderOptions) -> RailyardResult<Self> {
        Ok(Self {
            mount: attach_container(container, options)?,
        })
    }

    /// The underlying mount.
    pub fn mount(&self) -> &Mount<C> {
        &self.mount
    }

    /// The mounted container.
    pub fn container(&self) -> &C {
        self.mount.container()
    }

    /// Release the container.
    pub fn into_container(self) -> C {
        self.mount.into_container()
    }

    /// Mark the container as loading and parse `text`.
    ///
    /// The loading state is cleared right away when parsing fails or is cancelled.
    pub async fn parse(&mut self, text: impl Into<String>) -> RailyardResult<Session> {
        self.mount.container.add_class(LOADING_CLASS);
        match session::parse(text).await {
            Ok(session) if session.state() == SessionState::Parsed => Ok(session),
            Ok(session) => {
                self.mount.clear_loading()?;
                Ok(session)
            }
            Err(err) => {
                self.mount.clear_loading()?;
                Err(err)
            }
        }
    }

    /// Render `session`, attaching the diagram only when the traversal completes.
    ///
    /// Progress goes to both the indicator and `progress`. The loading state is cleared on
    /// every exit path.
    pub async fn render(
        &mut self,
        session: &mut Session,
        progress: &mut dyn ProgressSink,
    ) -> RailyardResult<RenderOutcome> {
        if !matches!(
            session.state(),
            SessionState::Parsed | SessionState::Cancelled
        ) {
            return Err(RailyardError::validation(format!(
                "cannot render a session in state {:?}",
                session.state()
            )));
        }
        self.mount.container.add_class(LOADING_CLASS);
        let mut indicator = LoadingIndicator {
            mount: &mut self.mount,
            sink: progress,
        };
        let result = session.render(&mut indicator).await;
        indicator.finish()?;

        let outcome = result?;
        if let RenderOutcome::Rendered(doc) = &outcome {
            let slot = self.mount.diagram;
            *self.mount.container.child_mut(slot)? = Element::Diagram(Some(doc.clone()));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/renderer.rs"]
mod tests;
