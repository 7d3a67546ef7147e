use crate::actors::messages::{
    ActorError, AppError, AskOutcome, ClearOutcome, ControllerMessage, ExportOutcome,
};
use crate::actors::traits::Responder;
use crate::brain;
use crate::clipboard::Clipboard;
use crate::export::{self, ExportFormat};
use crate::models::{HistoryRecord, Tag, TagFilter};
use crate::render::{html, projection, ChatView};
use crate::store::HistoryStore;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, instrument, warn};

/// Inline error bubble shown when the responder fails.
pub const ANSWER_FAILED: &str = "Error fetching answer from server.";
pub const COPIED_NOTICE: &str = "Answer copied to clipboard";
pub const SNAPSHOT_FILENAME: &str = "chathelper_view.html";

/// Time allowed for non-ask requests to be answered by the controller.
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);
/// Extra time on top of the response timeout before an ask is considered lost.
const ASK_REPLY_SLACK: Duration = Duration::from_secs(5);

/// The two exchanges a fresh demo session starts with.
const DEMO_SEED: &[(&str, &str, Tag)] = &[
    ("What is AI?", brain::answers::AI_DEFINITION, Tag::General),
    (
        "How to learn Python?",
        "Start with basics: syntax, data types, control flow. Build mini projects and use online resources.",
        Tag::Programming,
    ),
];

/// Phases of a single ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskState {
    Idle,
    Submitted,
    AwaitingResponse,
    Answered,
    Failed,
}

impl AskState {
    pub fn can_transition_to(self, next: AskState) -> bool {
        use AskState::*;
        matches!(
            (self, next),
            (Idle, Submitted)
                | (Submitted, AwaitingResponse)
                | (AwaitingResponse, Answered)
                | (AwaitingResponse, Failed)
                | (Answered, Idle)
                | (Failed, Idle)
        )
    }
}

impl fmt::Display for AskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Settings the controller needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub response_timeout: Duration,
    pub export_dir: PathBuf,
    pub seed_demo: bool,
}

/// A handle to the controller actor.
///
/// This is the entry point for every user action. The actor owns the history
/// store and the view and handles one message at a time, so asks submitted
/// while another is pending are queued and run in order.
#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<ControllerMessage>,
    ask_timeout: Duration,
}

impl ControllerHandle {
    /// Spawns the controller actor on the current tokio runtime and returns a handle to it.
    pub fn spawn<R, V, C>(
        responder: Arc<R>,
        view: V,
        clipboard: Arc<C>,
        options: ControllerOptions,
    ) -> Self
    where
        R: Responder,
        V: ChatView,
        C: Clipboard,
    {
        let (sender, receiver) = mpsc::channel(32);
        let ask_timeout = options.response_timeout + ASK_REPLY_SLACK;
        let runner = ControllerRunner::new(receiver, responder, view, clipboard, options);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            ask_timeout,
        }
    }

    /// Submits raw input. Blank input is ignored without touching the view.
    #[instrument(skip(self, question))]
    pub async fn ask(&self, question: String) -> Result<AskOutcome, AppError> {
        let limit = self.ask_timeout;
        self.request(limit, |responder| ControllerMessage::Ask {
            question,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_filter(&self, filter: TagFilter) -> Result<(), AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::SetFilter {
            filter,
            responder,
        })
        .await
    }

    pub async fn refresh_sidebar(&self) -> Result<(), AppError> {
        self.request(REPLY_TIMEOUT, |responder| {
            ControllerMessage::RefreshSidebar { responder }
        })
        .await
    }

    /// Puts the question of record `id` back in the input field. Returns it, if found.
    #[instrument(skip(self))]
    pub async fn view_record(&self, id: i64) -> Result<Option<String>, AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::ViewRecord {
            id,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn copy_answer(&self, id: i64) -> Result<(), AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::CopyAnswer {
            id,
            responder,
        })
        .await?
    }

    /// Empties the history, but only when the caller obtained the user's confirmation.
    #[instrument(skip(self))]
    pub async fn clear_history(&self, confirmed: bool) -> Result<ClearOutcome, AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::ClearHistory {
            confirmed,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn export(&self, format: ExportFormat) -> Result<ExportOutcome, AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::Export {
            format,
            responder,
        })
        .await?
    }

    pub async fn snapshot(&self) -> Result<ExportOutcome, AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::Snapshot {
            responder,
        })
        .await?
    }

    /// Copy of the history, newest first.
    pub async fn records(&self) -> Result<Vec<HistoryRecord>, AppError> {
        self.request(REPLY_TIMEOUT, |responder| ControllerMessage::Records {
            responder,
        })
        .await
    }

    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(ControllerMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(ActorError::Closed(e.to_string())))
    }

    async fn request<T>(
        &self,
        limit: Duration,
        build: impl FnOnce(oneshot::Sender<T>) -> ControllerMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| AppError::Actor(ActorError::Closed(e.to_string())))?;
        timeout(limit, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(|e| AppError::Actor(ActorError::Closed(e.to_string())))
    }
}

// --- Actor Runner ---
struct ControllerRunner<R, V, C>
where
    R: Responder,
    V: ChatView,
    C: Clipboard,
{
    receiver: mpsc::Receiver<ControllerMessage>,
    responder: Arc<R>,
    view: V,
    clipboard: Arc<C>,
    store: HistoryStore,
    filter: TagFilter,
    state: AskState,
    options: ControllerOptions,
}

impl<R, V, C> ControllerRunner<R, V, C>
where
    R: Responder,
    V: ChatView,
    C: Clipboard,
{
    fn new(
        receiver: mpsc::Receiver<ControllerMessage>,
        responder: Arc<R>,
        view: V,
        clipboard: Arc<C>,
        options: ControllerOptions,
    ) -> Self {
        let mut store = HistoryStore::new();
        if options.seed_demo {
            for (question, answer, tag) in DEMO_SEED {
                store.append(question.to_string(), answer.to_string(), *tag);
            }
        }
        Self {
            receiver,
            responder,
            view,
            clipboard,
            store,
            filter: TagFilter::All,
            state: AskState::Idle,
            options,
        }
    }

    async fn run(mut self) {
        info!("Controller started with {} records", self.store.len());
        self.render_all();
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, ControllerMessage::Shutdown) {
                info!("Controller shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Controller stopped");
    }

    async fn handle_message(&mut self, msg: ControllerMessage) {
        match msg {
            ControllerMessage::Ask {
                question,
                responder,
            } => {
                let outcome = self.handle_ask(question).await;
                let _ = responder.send(outcome);
            }
            ControllerMessage::SetFilter { filter, responder } => {
                debug!("Filter changed to {}", filter);
                self.filter = filter;
                self.render_sidebar();
                let _ = responder.send(());
            }
            ControllerMessage::RefreshSidebar { responder } => {
                self.render_sidebar();
                let _ = responder.send(());
            }
            ControllerMessage::ViewRecord { id, responder } => {
                let _ = responder.send(self.handle_view(id));
            }
            ControllerMessage::CopyAnswer { id, responder } => {
                let result = self.handle_copy(id).await;
                let _ = responder.send(result);
            }
            ControllerMessage::ClearHistory {
                confirmed,
                responder,
            } => {
                let _ = responder.send(self.handle_clear(confirmed));
            }
            ControllerMessage::Export { format, responder } => {
                let result = self.handle_export(format).await;
                if let Err(e) = &result {
                    error!("Export failed: {}", e);
                    self.view.show_error(&format!("Export failed: {}", e));
                }
                let _ = responder.send(result);
            }
            ControllerMessage::Snapshot { responder } => {
                let result = self.handle_snapshot().await;
                if let Err(e) = &result {
                    error!("Snapshot failed: {}", e);
                    self.view.show_error(&format!("Snapshot failed: {}", e));
                }
                let _ = responder.send(result);
            }
            ControllerMessage::Records { responder } => {
                let _ = responder.send(self.store.all().to_vec());
            }
            ControllerMessage::Shutdown => {}
        }
    }

    fn transition(&mut self, next: AskState) {
        if !self.state.can_transition_to(next) {
            warn!("Unexpected ask transition {} -> {}", self.state, next);
        }
        debug!("Ask state {} -> {}", self.state, next);
        self.state = next;
    }

    #[instrument(skip(self, question))]
    async fn handle_ask(&mut self, question: String) -> AskOutcome {
        let question = question.trim();
        if question.is_empty() {
            return AskOutcome::Ignored;
        }
        let question = question.to_string();

        self.transition(AskState::Submitted);
        self.view.show_pending(&question);
        self.transition(AskState::AwaitingResponse);

        let reply = timeout(
            self.options.response_timeout,
            self.responder.respond(question.clone()),
        )
        .await
        .map_err(AppError::from)
        .and_then(|r| r);

        self.view.clear_pending();
        match reply {
            Ok(answer) => {
                let tag = brain::classify(&question);
                let record = self.store.append(question, answer, tag);
                self.transition(AskState::Answered);
                self.render_all();
                self.view.set_input("");
                self.transition(AskState::Idle);
                info!(id = record.id, tag = %record.tag, "Question answered");
                AskOutcome::Answered(record)
            }
            Err(e) => {
                error!("Responder failed: {}", e);
                self.transition(AskState::Failed);
                self.view.show_error(ANSWER_FAILED);
                self.view.set_input(&question);
                self.transition(AskState::Idle);
                AskOutcome::Failed(e.to_string())
            }
        }
    }

    fn handle_view(&mut self, id: i64) -> Option<String> {
        let question = self.store.find(id).map(|r| r.question.clone());
        match &question {
            Some(q) => {
                self.view.set_input(q);
                self.render_transcript();
            }
            None => self.view.notify(&format!("No history item #{}", id)),
        }
        question
    }

    async fn handle_copy(&mut self, id: i64) -> Result<(), AppError> {
        let answer = match self.store.find(id) {
            Some(record) => record.answer.clone(),
            None => {
                let msg = format!("No history item #{}", id);
                self.view.notify(&msg);
                return Err(AppError::Validation(msg));
            }
        };
        match self.clipboard.copy(&answer).await {
            Ok(()) => {
                self.view.notify(COPIED_NOTICE);
                Ok(())
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                self.view.show_error(&format!("Could not copy answer: {}", e));
                Err(e)
            }
        }
    }

    fn handle_clear(&mut self, confirmed: bool) -> ClearOutcome {
        if !confirmed {
            return ClearOutcome::NotConfirmed;
        }
        let removed = self.store.len();
        self.store.clear();
        self.render_all();
        info!("History cleared ({} records)", removed);
        ClearOutcome::Cleared { removed }
    }

    async fn handle_export(&mut self, format: ExportFormat) -> Result<ExportOutcome, AppError> {
        if self.store.is_empty() {
            self.view.notify(format.empty_notice());
            return Ok(ExportOutcome::Empty);
        }
        let contents = format.render(self.store.all())?;
        let path =
            export::write_file(&self.options.export_dir, format.filename(), &contents).await?;
        self.view.notify(&format!("Saved {}", path.display()));
        Ok(ExportOutcome::Written(path))
    }

    async fn handle_snapshot(&mut self) -> Result<ExportOutcome, AppError> {
        let page = html::page(
            &projection::transcript(self.store.all()),
            &projection::sidebar(self.store.filtered_by(self.filter), self.filter),
        );
        let path = export::write_file(&self.options.export_dir, SNAPSHOT_FILENAME, &page).await?;
        self.view.notify(&format!("Saved {}", path.display()));
        Ok(ExportOutcome::Written(path))
    }

    /// Every store mutation ends here: both projections are rebuilt and painted.
    fn render_all(&mut self) {
        debug!(revision = self.store.revision(), "Rendering all views");
        self.render_sidebar();
        self.render_transcript();
    }

    fn render_transcript(&mut self) {
        let view = projection::transcript(self.store.all());
        self.view.render_transcript(&view);
    }

    fn render_sidebar(&mut self) {
        let view = projection::sidebar(self.store.filtered_by(self.filter), self.filter);
        self.view.render_sidebar(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_state_edges() {
        use AskState::*;
        assert!(Idle.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(AwaitingResponse));
        assert!(AwaitingResponse.can_transition_to(Answered));
        assert!(AwaitingResponse.can_transition_to(Failed));
        assert!(Answered.can_transition_to(Idle));
        assert!(Failed.can_transition_to(Idle));

        assert!(!Idle.can_transition_to(Answered));
        assert!(!Submitted.can_transition_to(Answered));
        assert!(!Answered.can_transition_to(Submitted));
    }

    #[test]
    fn test_demo_seed_matches_rules() {
        for (question, _, tag) in DEMO_SEED {
            assert_eq!(brain::classify(question), *tag);
        }
    }
}
