//! Sort-order interpretation shared by every task listing path.

use super::QueryError;
use crate::task::domain::Task;
use std::cmp::Ordering;

/// Total ordering applied to task listings.
///
/// Priority orderings derive from the single rank mapping on
/// [`crate::task::domain::TaskPriority::rank`]; ties fall back to the
/// default newest-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first (the default).
    CreatedAtDesc,
    /// Earliest due date first.
    DueDateAsc,
    /// Latest due date first.
    DueDateDesc,
    /// High, then Medium, then Low.
    PriorityHighFirst,
    /// Low, then Medium, then High.
    PriorityLowFirst,
    /// Free-form ordering over allow-listed fields.
    Fields(Vec<SortField>),
}

impl SortOrder {
    /// Parses a caller-supplied sort expression.
    ///
    /// Recognized symbolic keys are `dueDate`, `-dueDate`, `priority`, and
    /// `-priority`; anything else is treated as a comma-separated list of
    /// allow-listed field names, each optionally prefixed with `-` for
    /// descending order. An absent expression yields the default
    /// newest-first order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownSortField`] when a field is not on the
    /// allow-list.
    pub fn parse(raw: Option<&str>) -> Result<Self, QueryError> {
        let Some(expression) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::CreatedAtDesc);
        };

        match expression {
            "dueDate" => Ok(Self::DueDateAsc),
            "-dueDate" => Ok(Self::DueDateDesc),
            "priority" => Ok(Self::PriorityHighFirst),
            "-priority" => Ok(Self::PriorityLowFirst),
            _ => {
                let fields = expression
                    .split(',')
                    .map(SortField::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Fields(fields))
            }
        }
    }

    /// Compares two tasks under this ordering.
    ///
    /// Used by the in-memory store path; the `PostgreSQL` path orders by
    /// the equivalent SQL expressions.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::CreatedAtDesc => b.created_at().cmp(&a.created_at()),
            Self::DueDateAsc => a.due_date().cmp(&b.due_date()),
            Self::DueDateDesc => b.due_date().cmp(&a.due_date()),
            Self::PriorityHighFirst => a
                .priority()
                .rank()
                .cmp(&b.priority().rank())
                .then_with(|| b.created_at().cmp(&a.created_at())),
            Self::PriorityLowFirst => b
                .priority()
                .rank()
                .cmp(&a.priority().rank())
                .then_with(|| b.created_at().cmp(&a.created_at())),
            Self::Fields(fields) => fields
                .iter()
                .map(|field| field.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::CreatedAtDesc
    }
}

/// One field of a free-form sort expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    /// Allow-listed field to sort on.
    pub field: SortableField,
    /// `true` for descending order.
    pub descending: bool,
}

impl SortField {
    /// Parses one `field` or `-field` token.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownSortField`] when the token is not on
    /// the allow-list.
    pub fn parse(token: &str) -> Result<Self, QueryError> {
        let trimmed = token.trim();
        let (name, descending) = trimmed
            .strip_prefix('-')
            .map_or((trimmed, false), |rest| (rest, true));
        let field = SortableField::parse(name)?;
        Ok(Self { field, descending })
    }

    /// Compares two tasks on this field.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = self.field.compare(a, b);
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Fields permitted in free-form sort expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortableField {
    /// Lexicographic title order.
    Title,
    /// Lexicographic status order.
    Status,
    /// Priority rank order (High before Medium before Low ascending).
    Priority,
    /// Due date order.
    DueDate,
    /// Creation timestamp order.
    CreatedAt,
    /// Mutation timestamp order.
    UpdatedAt,
}

impl SortableField {
    /// Resolves an external field name against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownSortField`] for any other name.
    pub fn parse(name: &str) -> Result<Self, QueryError> {
        match name {
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "dueDate" => Ok(Self::DueDate),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            _ => Err(QueryError::UnknownSortField(name.to_owned())),
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Title => a.title().cmp(b.title()),
            Self::Status => a.status().as_str().cmp(b.status().as_str()),
            Self::Priority => a.priority().rank().cmp(&b.priority().rank()),
            Self::DueDate => a.due_date().cmp(&b.due_date()),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        }
    }
}
