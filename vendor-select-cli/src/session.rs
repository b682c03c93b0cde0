//! Interactive selection session.
//!
//! Owns the table state and the selection workflow, re-queries the listing
//! provider on every view change, and renders the current view.

use std::io::Write;

use log::{debug, warn};
use vendor_select_lib::AggregateStatus;
use vendor_select_lib::SelectionWorkflow;
use vendor_select_lib::listing::Direction;
use vendor_select_lib::listing::ListingProvider;
use vendor_select_lib::listing::OrderBy;
use vendor_select_lib::listing::PaginationMode;
use vendor_select_lib::listing::TableState;
use vendor_select_lib::model::Vendor;

use crate::commands::Command;
use crate::error::CliError;
use crate::settings::ViewPreferences;

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keep reading commands.
    Continue,
    /// The command was refused; show the message and keep reading.
    Rejected(String),
    /// The selection was committed.
    Committed(Vec<Vendor>),
    /// The selection was abandoned.
    Cancelled,
}

pub struct Session<P> {
    provider: P,
    preferences: ViewPreferences,
    state: TableState,
    workflow: SelectionWorkflow<Vendor>,
    description: Option<String>,
}

impl<P: ListingProvider<Vendor>> Session<P> {
    pub fn new(
        provider: P,
        preferences: ViewPreferences,
        state: TableState,
        description: Option<String>,
    ) -> Self {
        Self {
            provider,
            preferences,
            state,
            workflow: SelectionWorkflow::new(),
            description,
        }
    }

    pub fn table_state(&self) -> &TableState {
        &self.state
    }

    pub fn workflow(&self) -> &SelectionWorkflow<Vendor> {
        &self.workflow
    }

    /// Fetch the visible set for the current table state and remember it.
    pub async fn refresh(&mut self) -> Result<(), CliError> {
        let listing = self.provider.list(&self.state).await?;
        self.workflow.show(listing);
        self.remember_view().await;
        Ok(())
    }

    /// Replace the table state, e.g. when stored preferences turn out stale.
    pub async fn reset_view(&mut self, state: TableState) -> Result<(), CliError> {
        self.state = state;
        self.refresh().await
    }

    pub async fn handle(&mut self, command: Command) -> Result<Outcome, CliError> {
        debug!("Handling {:?}", command);
        match command {
            Command::List | Command::Help => Ok(Outcome::Continue),
            Command::Toggle(ids) => {
                for id in ids {
                    self.workflow.toggle(id);
                }
                Ok(Outcome::Continue)
            }
            Command::SelectAll => {
                self.workflow.set_all_visible(true);
                Ok(Outcome::Continue)
            }
            Command::SelectNone => {
                self.workflow.set_all_visible(false);
                Ok(Outcome::Continue)
            }
            Command::Filter(filter) => self.change_view(|state| state.push_filter(filter)).await,
            Command::ClearFilters => self.change_view(TableState::clear_filters).await,
            Command::Sort(field, direction) => {
                let sorters = match direction {
                    Direction::Asc => OrderBy::asc(field),
                    Direction::Desc => OrderBy::desc(field),
                };
                self.change_view(|state| state.sorters = sorters).await
            }
            Command::ClearSort => self.change_view(|state| state.sorters = OrderBy::none()).await,
            Command::Page(page) => {
                if !self.state.pagination.is_paged() {
                    return Ok(Outcome::Rejected("paging is off".to_string()));
                }
                self.change_view(|state| state.pagination.current = page.max(1))
                    .await
            }
            Command::PageSize(size) => {
                if size == 0 {
                    return Ok(Outcome::Rejected("page size must be at least 1".to_string()));
                }
                self.change_view(|state| {
                    state.pagination.page_size = size;
                    state.pagination.current = 1;
                })
                .await
            }
            Command::Paging(on) => {
                self.change_view(|state| {
                    state.pagination.mode = if on {
                        PaginationMode::Server
                    } else {
                        PaginationMode::Off
                    };
                    state.pagination.current = 1;
                })
                .await
            }
            Command::Commit => match self.workflow.commit() {
                Ok(vendors) => Ok(Outcome::Committed(vendors)),
                Err(err) => Ok(Outcome::Rejected(err.to_string())),
            },
            Command::Cancel => {
                if let Err(err) = self.workflow.cancel() {
                    warn!("{}", err);
                }
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// Stores the current table state. Failures are logged and ignored.
    async fn remember_view(&self) {
        if let Err(e) = self.preferences.save(&self.state).await {
            warn!("Cannot save view: {}", e);
        }
    }

    /// Apply a table state change, rolling it back if the provider refuses it.
    async fn change_view(&mut self, change: impl FnOnce(&mut TableState)) -> Result<Outcome, CliError> {
        let previous = self.state.clone();
        change(&mut self.state);

        match self.provider.list(&self.state).await {
            Ok(listing) => {
                self.workflow.show(listing);
                self.remember_view().await;
                Ok(Outcome::Continue)
            }
            Err(err) => {
                warn!("Rejected view change: {}", err);
                self.state = previous;
                Ok(Outcome::Rejected(err.to_string()))
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if let Some(description) = &self.description {
            writeln!(out, "{}", description)?;
        }

        let rows = self.workflow.visible();
        if rows.is_empty() {
            writeln!(out, "    (no vendors match)")?;
        }
        let id_width = rows
            .iter()
            .map(|vendor| vendor.id.to_string().len())
            .max()
            .unwrap_or(1);
        for vendor in rows {
            let mark = if self.workflow.is_selected(&vendor.id) { "[x]" } else { "[ ]" };
            write!(out, "{} {:>width$}  {}", mark, vendor.id, vendor.name, width = id_width)?;
            if let Some(comment) = &vendor.comment {
                write!(out, "  ({})", comment)?;
            }
            writeln!(out)?;
        }

        let summary = self.workflow.summary();
        let checkbox = match summary.status {
            AggregateStatus::All => "[x]",
            AggregateStatus::Some => "[-]",
            AggregateStatus::None => "[ ]",
        };
        writeln!(out, "{} Select all    {}", checkbox, summary)?;

        let pagination = &self.state.pagination;
        if pagination.is_paged() {
            writeln!(
                out,
                "Page {}/{}, {} matching",
                pagination.current,
                pagination.page_count(summary.total),
                summary.total
            )?;
        } else {
            writeln!(out, "{} matching", summary.total)?;
        }
        Ok(())
    }
}
