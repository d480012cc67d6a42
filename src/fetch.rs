use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::api;
use crate::state::{Delta, FetchCommand, Payload};

/// Runs all blocking I/O on a background thread. Commands are handled one at
/// a time, so there is never more than one request in flight; a navigation
/// that supersedes a pending request is resolved on the UI side by ticket,
/// not by interrupting the transfer.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<FetchCommand>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let ticket = cmd.ticket();
            let result = match &cmd {
                FetchCommand::Competitions { .. } => {
                    api::fetch_competitions().map(Payload::Competitions)
                }
                FetchCommand::Fixtures { competition_id, .. } => {
                    api::fetch_fixtures(competition_id).map(Payload::Fixtures)
                }
                FetchCommand::Details { request, .. } => {
                    api::fetch_match_details(request).map(Payload::Details)
                }
            };
            let delta = match result {
                Ok(payload) => Delta::Loaded { ticket, payload },
                // `{:#}` keeps the whole context chain, so a server-supplied
                // error body survives into the rendered message.
                Err(err) => Delta::Failed {
                    ticket,
                    message: format!("{err:#}"),
                },
            };
            if tx.send(delta).is_err() {
                break;
            }
        }
    });
}
