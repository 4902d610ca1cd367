//! Term repository port.

use async_trait::async_trait;

use super::persistence::{PersistenceError, Upserted};
use crate::domain::foundation::TermId;
use crate::domain::records::{NewTerm, TermName, TermRecord};

/// Access to academic terms, unique on `(term_name, academic_year)`.
#[async_trait]
pub trait TermRepository: Send + Sync {
    /// Finds the term with the given name and academic year.
    async fn find_by_name_and_year(
        &self,
        term_name: TermName,
        academic_year: &str,
    ) -> Result<Option<TermRecord>, PersistenceError>;

    /// Returns the existing term for the natural key of `term`, or inserts it.
    ///
    /// Implementations must perform the lookup and insert atomically with
    /// respect to other upserts on the same store.
    async fn upsert(&self, term: NewTerm) -> Result<Upserted<TermRecord>, PersistenceError>;

    /// Overwrites the semester number of an existing term.
    async fn update_semester_number(
        &self,
        id: TermId,
        semester_number: u8,
    ) -> Result<TermRecord, PersistenceError>;
}
