//! # Command execution layer
//!
//! The boundary between the pure reducer in [`crate::app`] and the outside
//! world. [`from_effects`] turns the reducer's [`Effect`]s into [`Cmd`]s and
//! [`run_cmds`] executes them on the tokio runtime. Results are not applied
//! here: they are sent back to the UI loop as [`Msg`]s so the store is only
//! mutated by [`crate::app::App::update`].

use std::sync::Arc;

use jitpages_engine::{FetchTicket, JsonFetcher};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::app::{Effect, Msg};

/// Side-effectful work to run outside the reducer.
#[derive(Debug)]
pub enum Cmd {
    /// Resolve the ticket and report a [`Msg::FetchCompleted`].
    FetchPage(FetchTicket),
}

pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .map(|effect| match effect {
            Effect::Fetch(ticket) => Cmd::FetchPage(ticket),
        })
        .collect()
}

/// Spawn a task per command. The returned handles are only needed by tests;
/// the UI loop learns about completion through `sender`.
pub fn run_cmds(commands: Vec<Cmd>, fetcher: &Arc<dyn JsonFetcher>, sender: &UnboundedSender<Msg>) -> Vec<JoinHandle<()>> {
    commands
        .into_iter()
        .map(|command| match command {
            Cmd::FetchPage(ticket) => spawn_fetch(ticket, Arc::clone(fetcher), sender.clone()),
        })
        .collect()
}

fn spawn_fetch(ticket: FetchTicket, fetcher: Arc<dyn JsonFetcher>, sender: UnboundedSender<Msg>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = ticket.resolve(fetcher.as_ref()).await.map_err(|error| error.to_string());
        let msg = Msg::FetchCompleted {
            page_id: ticket.page_id(),
            result,
        };
        if sender.send(msg).is_err() {
            warn!(page_id = ticket.page_id(), "ui loop closed before fetch completed");
        }
    })
}
