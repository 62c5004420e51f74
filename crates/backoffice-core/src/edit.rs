//! Stock edit protocols for the Variant List.
//!
//! [`VariantTable`] implements the per-row inline editor: at most one
//! [`EditSession`] exists per table, and a row with no session is in the
//! view phase. [`BatchEditor`] implements the per-product modal that edits
//! every variant of one product and commits them in a single request.
//!
//! Neither type performs I/O. A save is split into `begin_save`, which
//! produces the request payload and enters the saving phase, and
//! `finish_save`, which applies the server's answer.
//!
//! Nothing prevents a table session and a batch editor from targeting the
//! same product at once; callers should keep a single edit surface open per
//! product, since the later commit silently wins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::records::{ProductVariant, VariantRow};

/// Parses user-entered stock text.
///
/// # Errors
///
/// Returns [`CoreError::InvalidStock`] unless the trimmed input is a
/// non-negative integer that fits in `u32`.
pub fn parse_stock_input(input: &str) -> Result<u32, CoreError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| CoreError::InvalidStock {
            input: input.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    /// The row shows an input bound to the pending value.
    Editing,
    /// A save request is in flight; the input is disabled.
    Saving,
    /// The last save failed. The pending value is kept so the user can retry.
    Failed { message: String },
}

impl EditPhase {
    #[must_use]
    pub fn is_saving(&self) -> bool {
        matches!(self, EditPhase::Saving)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub product_id: i64,
    pub variant_id: i64,
    /// Value entered by the user; `None` until something is entered.
    pub pending: Option<u32>,
    pub phase: EditPhase,
}

/// Payload for the single-row stock update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockCommit {
    pub product_id: i64,
    pub variant_id: i64,
    pub stock: u32,
}

/// Result of a confirmed single-row save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockNotice {
    pub variant_id: i64,
    /// Stock the row showed before the save; `None` if the row left the
    /// table while the request was in flight.
    pub previous: Option<u32>,
    pub stock: u32,
}

impl std::fmt::Display for StockNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.previous {
            Some(previous) => write!(
                f,
                "stock for variant {} changed from {previous} to {}",
                self.variant_id, self.stock
            ),
            None => write!(
                f,
                "stock for variant {} set to {} (row no longer on this page)",
                self.variant_id, self.stock
            ),
        }
    }
}

/// Rows of one Variant List page plus the table's single edit session.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    rows: Vec<VariantRow>,
    session: Option<EditSession>,
}

impl VariantTable {
    #[must_use]
    pub fn new(rows: Vec<VariantRow>) -> Self {
        Self {
            rows,
            session: None,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[VariantRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, variant_id: i64) -> Option<&VariantRow> {
        self.rows.iter().find(|r| r.id == variant_id)
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Replaces the rows after a page fetch.
    ///
    /// An idle session whose row is no longer present is dropped. A session
    /// that is mid-save is kept so its answer can still be applied.
    pub fn replace_rows(&mut self, rows: Vec<VariantRow>) {
        self.rows = rows;
        let orphaned = self
            .session
            .as_ref()
            .is_some_and(|s| !s.phase.is_saving() && self.row(s.variant_id).is_none());
        if orphaned {
            self.session = None;
        }
    }

    /// Stock to render for a row: the entered value while that row is being
    /// edited, otherwise the confirmed stock.
    #[must_use]
    pub fn displayed_stock(&self, variant_id: i64) -> Option<u32> {
        match &self.session {
            Some(EditSession {
                variant_id: id,
                pending: Some(pending),
                ..
            }) if *id == variant_id => Some(*pending),
            _ => self.row(variant_id).map(|r| r.stock),
        }
    }

    /// Opens an edit session on a row. The input shows the confirmed stock
    /// until a value is entered.
    ///
    /// Any idle session on another row is discarded first.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SaveInFlight`] if the current session is saving.
    /// - [`CoreError::UnknownVariant`] if the row is not in the table.
    pub fn begin_edit(&mut self, variant_id: i64) -> Result<&EditSession, CoreError> {
        if let Some(current) = &self.session {
            if current.phase.is_saving() {
                return Err(CoreError::SaveInFlight {
                    variant_id: current.variant_id,
                });
            }
        }
        let row = self
            .row(variant_id)
            .ok_or(CoreError::UnknownVariant { variant_id })?;
        let session = EditSession {
            product_id: row.product_id,
            variant_id,
            pending: None,
            phase: EditPhase::Editing,
        };
        Ok(self.session.insert(session))
    }

    /// Updates the pending value of the open session.
    ///
    /// Returns `false` when there is no session to update.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SaveInFlight`] while a save is outstanding.
    pub fn set_pending(&mut self, stock: u32) -> Result<bool, CoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        if session.phase.is_saving() {
            return Err(CoreError::SaveInFlight {
                variant_id: session.variant_id,
            });
        }
        session.pending = Some(stock);
        Ok(true)
    }

    /// Parses and stores user-entered text as the pending value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStock`] for non-numeric or negative text
    /// (the previous pending value is kept), or [`CoreError::SaveInFlight`].
    pub fn set_pending_input(&mut self, input: &str) -> Result<bool, CoreError> {
        let stock = parse_stock_input(input)?;
        self.set_pending(stock)
    }

    /// Drops the open session unless it is mid-save.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SaveInFlight`] while a save is outstanding.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if let Some(session) = &self.session {
            if session.phase.is_saving() {
                return Err(CoreError::SaveInFlight {
                    variant_id: session.variant_id,
                });
            }
        }
        self.session = None;
        Ok(())
    }

    /// Enters the saving phase and returns the request to send.
    ///
    /// Returns `None` when there is no session, nothing has been entered, or
    /// a save is already in flight.
    pub fn begin_save(&mut self) -> Option<StockCommit> {
        let session = self.session.as_mut()?;
        if session.phase.is_saving() {
            return None;
        }
        let stock = session.pending?;
        session.phase = EditPhase::Saving;
        Some(StockCommit {
            product_id: session.product_id,
            variant_id: session.variant_id,
            stock,
        })
    }

    /// Applies the outcome of the request returned by [`Self::begin_save`].
    ///
    /// On success the row takes the pending stock and the session closes. On
    /// failure the session moves to [`EditPhase::Failed`] with the pending
    /// value intact. Returns `None` on failure or if no saving session is
    /// open; every success yields a notice, even when the row has since left
    /// the table.
    pub fn finish_save(&mut self, outcome: Result<(), String>) -> Option<StockNotice> {
        let session = self.session.as_mut().filter(|s| s.phase.is_saving())?;
        match outcome {
            Ok(()) => {
                let variant_id = session.variant_id;
                let stock = session.pending?;
                self.session = None;
                let previous = self
                    .rows
                    .iter_mut()
                    .find(|r| r.id == variant_id)
                    .map(|row| std::mem::replace(&mut row.stock, stock));
                Some(StockNotice {
                    variant_id,
                    previous,
                    stock,
                })
            }
            Err(message) => {
                session.phase = EditPhase::Failed { message };
                None
            }
        }
    }
}

/// One line of a batch stock update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStockLine {
    pub id: i64,
    pub size: String,
    pub color: String,
    pub stock: u32,
}

/// Body of the batch stock update endpoint: `{"prodStocks": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStockUpdate {
    pub prod_stocks: Vec<BatchStockLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchPhase {
    Open,
    Saving,
    Failed { message: String },
    /// The batch was accepted; the editor should be dismissed.
    Closed,
}

/// Modal editor over every variant of one product.
#[derive(Debug, Clone)]
pub struct BatchEditor {
    product_id: i64,
    variants: Vec<ProductVariant>,
    pending: BTreeMap<i64, u32>,
    phase: BatchPhase,
}

impl BatchEditor {
    /// Seeds the pending map from the fetched stocks.
    #[must_use]
    pub fn new(product_id: i64, variants: Vec<ProductVariant>) -> Self {
        let pending = variants.iter().map(|v| (v.id, v.stock)).collect();
        Self {
            product_id,
            variants,
            pending,
            phase: BatchPhase::Open,
        }
    }

    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    #[must_use]
    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    #[must_use]
    pub fn phase(&self) -> &BatchPhase {
        &self.phase
    }

    #[must_use]
    pub fn pending(&self, variant_id: i64) -> Option<u32> {
        self.pending.get(&variant_id).copied()
    }

    fn ensure_editable(&self) -> Result<(), CoreError> {
        if self.phase == BatchPhase::Saving {
            return Err(CoreError::BatchInFlight {
                product_id: self.product_id,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// - [`CoreError::UnknownVariant`] if the variant does not belong to the product.
    /// - [`CoreError::BatchInFlight`] while the batch is being saved.
    pub fn set_pending(&mut self, variant_id: i64, stock: u32) -> Result<(), CoreError> {
        self.ensure_editable()?;
        let slot = self
            .pending
            .get_mut(&variant_id)
            .ok_or(CoreError::UnknownVariant { variant_id })?;
        *slot = stock;
        Ok(())
    }

    /// # Errors
    ///
    /// As [`Self::set_pending`], plus [`CoreError::InvalidStock`] for bad text.
    pub fn set_pending_input(&mut self, variant_id: i64, input: &str) -> Result<(), CoreError> {
        let stock = parse_stock_input(input)?;
        self.set_pending(variant_id, stock)
    }

    /// Variants whose pending stock differs from the fetched stock, as
    /// `(variant_id, old, new)`.
    #[must_use]
    pub fn changed(&self) -> Vec<(i64, u32, u32)> {
        self.variants
            .iter()
            .filter_map(|v| {
                let pending = self.pending(v.id)?;
                (pending != v.stock).then_some((v.id, v.stock, pending))
            })
            .collect()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changed().is_empty()
    }

    /// Enters the saving phase and returns the full batch to submit.
    ///
    /// Every variant is included, changed or not. Returns `None` while a save
    /// is in flight or after the batch was accepted.
    pub fn begin_save(&mut self) -> Option<BatchStockUpdate> {
        if matches!(self.phase, BatchPhase::Saving | BatchPhase::Closed) {
            return None;
        }
        self.phase = BatchPhase::Saving;
        let prod_stocks = self
            .variants
            .iter()
            .map(|v| BatchStockLine {
                id: v.id,
                size: v.size.clone(),
                color: v.color.clone(),
                stock: self.pending(v.id).unwrap_or(v.stock),
            })
            .collect();
        Some(BatchStockUpdate { prod_stocks })
    }

    /// Applies the all-or-nothing outcome of the batch request.
    ///
    /// Returns `true` when the batch was accepted and the editor closed.
    pub fn finish_save(&mut self, outcome: Result<(), String>) -> bool {
        if self.phase != BatchPhase::Saving {
            return false;
        }
        match outcome {
            Ok(()) => {
                for v in &mut self.variants {
                    if let Some(stock) = self.pending.get(&v.id) {
                        v.stock = *stock;
                    }
                }
                self.phase = BatchPhase::Closed;
                true
            }
            Err(message) => {
                self.phase = BatchPhase::Failed { message };
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "edit_test.rs"]
mod tests;
