//! The three-phase action sequencer.

use crate::{POST_PHASE_WRITES, RunAborted, SequencerConfig, THREAD_OVERFETCH};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument};
use vasari_core::{ActionKind, CallLedger, LogEntry, RunReport, RunState};
use vasari_error::VasariResult;
use vasari_interface::{PlatformGateway, TextGenerator};

/// Spends a run's quota on posts, comment replies and DM replies.
///
/// The sequencer holds no state between runs. Each call to
/// [`run_once`](Self::run_once) starts from an empty log.
#[derive(Debug, Clone)]
pub struct ActionSequencer<G, P> {
    generator: G,
    gateway: P,
    config: SequencerConfig,
}

impl<G, P> ActionSequencer<G, P>
where
    G: TextGenerator,
    P: PlatformGateway,
{
    /// Creates a sequencer over a generator and a gateway.
    pub fn new(generator: G, gateway: P, config: SequencerConfig) -> Self {
        Self {
            generator,
            gateway,
            config,
        }
    }

    /// Run policy.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Text generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Platform gateway.
    pub fn gateway(&self) -> &P {
        &self.gateway
    }

    /// Executes one run with `quota` write actions.
    ///
    /// On success `calls_remaining == quota - log.len()`.
    ///
    /// # Errors
    ///
    /// The first generator or gateway failure aborts the run. The returned
    /// [`RunAborted`] carries the phase that failed and the actions that were
    /// completed before it.
    #[instrument(
        skip(self),
        fields(
            run_id = %uuid::Uuid::new_v4(),
            transport = %self.gateway.transport_name(),
            provider = %self.generator.provider_name(),
        )
    )]
    pub async fn run_once(&self, quota: u32) -> Result<RunReport, RunAborted> {
        let mut ledger = CallLedger::new(quota);
        let mut state = RunState::NotStarted;

        match self.drive(&mut ledger, &mut state).await {
            Ok(()) => {
                let report = ledger.into_report(Utc::now());
                info!(
                    actions = report.log().len(),
                    calls_remaining = report.calls_remaining(),
                    "Run complete"
                );
                Ok(report)
            }
            Err(source) => {
                let partial = ledger.into_report(Utc::now());
                error!(
                    failed_in = %state,
                    completed = partial.log().len(),
                    error = %source,
                    "Run aborted"
                );
                Err(RunAborted {
                    source,
                    failed_in: state,
                    partial,
                })
            }
        }
    }

    async fn drive(&self, ledger: &mut CallLedger, state: &mut RunState) -> VasariResult<()> {
        if ledger.quota().covers(POST_PHASE_WRITES) {
            *state = RunState::Posting;
            self.post_phase(ledger).await?;
        } else {
            debug!(remaining = ledger.remaining(), "Skipping post phase");
        }

        if ledger.quota().is_exhausted() {
            *state = RunState::Done;
            return Ok(());
        }
        *state = RunState::ReplyingComments;
        self.comment_phase(ledger).await?;

        if ledger.quota().is_exhausted() {
            *state = RunState::Done;
            return Ok(());
        }
        *state = RunState::ReplyingMessages;
        self.message_phase(ledger).await?;

        *state = RunState::Done;
        Ok(())
    }

    #[instrument(skip_all, fields(remaining = ledger.remaining()))]
    async fn post_phase(&self, ledger: &mut CallLedger) -> VasariResult<()> {
        for _ in 0..POST_PHASE_WRITES {
            let text = self.generator.generate(self.config.post_prompt()).await?;
            let result = self
                .gateway
                .publish_post(self.config.page_id(), &text)
                .await?;
            info!(action = %ActionKind::PublishPost, post_id = ?result.id(), "Published post");
            ledger.record(LogEntry::PublishPost { post: text, result })?;
        }
        Ok(())
    }

    #[instrument(skip_all, fields(remaining = ledger.remaining()))]
    async fn comment_phase(&self, ledger: &mut CallLedger) -> VasariResult<()> {
        let cap = ledger.quota().phase_cap(*self.config.phase_cap());
        let mut taken = 0u32;
        let mut seen = HashSet::new();

        let posts = self
            .gateway
            .list_recent_posts(self.config.page_id(), *self.config.recent_posts())
            .await?;
        debug!(posts = posts.len(), cap, "Scanning recent posts for comments");

        'posts: for post in &posts {
            let bound = (cap - taken).min(ledger.remaining());
            if bound == 0 {
                break;
            }
            let comments = self.gateway.list_comments(&post.id, bound).await?;

            for comment in comments {
                if taken >= cap || ledger.quota().is_exhausted() {
                    break 'posts;
                }
                if !seen.insert(comment.id.clone()) {
                    debug!(comment_id = %comment.id, "Skipping comment already answered this run");
                    continue;
                }

                let reply = self.generator.generate(&comment.message).await?;
                let result = self.gateway.reply_to_comment(&comment.id, &reply).await?;
                info!(
                    action = %ActionKind::ReplyComment,
                    comment_id = %comment.id,
                    "Replied to comment"
                );
                ledger.record(LogEntry::ReplyComment {
                    comment_id: comment.id,
                    result,
                })?;
                taken += 1;
            }
        }

        debug!(taken, "Comment phase finished");
        Ok(())
    }

    #[instrument(skip_all, fields(remaining = ledger.remaining()))]
    async fn message_phase(&self, ledger: &mut CallLedger) -> VasariResult<()> {
        let cap = ledger.quota().phase_cap(*self.config.phase_cap());
        let mut taken = 0u32;
        let mut seen = HashSet::new();

        let limit = ledger.remaining().saturating_mul(THREAD_OVERFETCH);
        let threads = self.gateway.list_recent_threads(limit).await?;
        debug!(threads = threads.len(), cap, "Scanning conversation threads");

        for thread in threads {
            if taken >= cap || ledger.quota().is_exhausted() {
                break;
            }
            if !thread.has_unread() {
                debug!(thread_id = %thread.id, reason = "no unread messages", "Skipping thread");
                continue;
            }
            if thread.is_spam() {
                debug!(thread_id = %thread.id, reason = "spam", "Skipping thread");
                continue;
            }
            if !seen.insert(thread.id.clone()) {
                debug!(thread_id = %thread.id, reason = "already answered", "Skipping thread");
                continue;
            }

            let latest = self.gateway.get_latest_message(&thread.id).await?;
            if latest.sender_id == self.gateway.account_id() {
                debug!(thread_id = %thread.id, reason = "self-authored", "Skipping thread");
                continue;
            }

            let reply = self.generator.generate(&latest.body).await?;
            let result = self
                .gateway
                .send_direct_message(&latest.sender_id, &reply)
                .await?;
            info!(
                action = %ActionKind::ReplyDm,
                thread_id = %thread.id,
                recipient_id = %latest.sender_id,
                "Replied to direct message"
            );
            ledger.record(LogEntry::ReplyDm {
                thread_id: thread.id,
                recipient_id: latest.sender_id,
                result,
            })?;
            taken += 1;
        }

        debug!(taken, "Message phase finished");
        Ok(())
    }
}
