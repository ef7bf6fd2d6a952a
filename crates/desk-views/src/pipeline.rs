use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use chrono::NaiveDate;

use desk_data::{Member, MembershipType, Payment};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 10;

pub const UNKNOWN_MEMBER: &str = "Unknown Member";

const MONTH_TOKENS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

impl FromStr for SortOrder {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desc" => Ok(SortOrder::Desc),
            "asc" => Ok(SortOrder::Asc),
            other => Err(anyhow!("unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MembershipType),
}

impl TypeFilter {
    pub fn matches(&self, membership_type: MembershipType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == membership_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        Ok(TypeFilter::Only(s.parse()?))
    }
}

/// Payments are additionally filterable by the short month
/// name of their payment date ("Jan", "Feb", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Month(String),
}

impl MonthFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(token) => {
                date.format("%b").to_string().eq_ignore_ascii_case(token)
            }
        }
    }
}

impl FromStr for MonthFilter {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let token = MONTH_TOKENS
            .iter()
            .find(|t| t.eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("unknown month: {}", s))?;
        Ok(MonthFilter::Month(token.to_string()))
    }
}

/// Pipeline parameters of the members screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberQuery {
    pub search: String,
    pub membership_type: TypeFilter,
    pub sort: SortOrder,
    pub page: usize,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            membership_type: TypeFilter::All,
            sort: SortOrder::Desc,
            page: 1,
        }
    }
}

/// Pipeline parameters of the payments screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentQuery {
    pub search: String,
    pub payment_type: TypeFilter,
    pub month: MonthFilter,
    pub sort: SortOrder,
    pub page: usize,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            payment_type: TypeFilter::All,
            month: MonthFilter::All,
            sort: SortOrder::Desc,
            page: 1,
        }
    }
}

/// One rendered table page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Effective page, after clamping the requested one.
    pub page: usize,
    pub total_pages: usize,
    /// Filtered row count across all pages.
    pub total_rows: usize,
}

/// Cut one page out of the filtered, sorted rows. A requested
/// page beyond the end lands on the last page instead of
/// showing an empty table.
pub fn paginate<T: Clone>(rows: &[T], requested: usize) -> Page<T> {
    let total_rows = rows.len();
    let total_pages = ((total_rows + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page = requested.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let rows = rows.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    Page {
        rows,
        page,
        total_pages,
        total_rows,
    }
}

/// Precomputed member id to display name mapping. Built once
/// per data load instead of scanning the member list for every
/// row on every render.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: HashMap<u32, String>,
}

impl NameIndex {
    pub fn build(members: &[Member]) -> Self {
        let names = members
            .iter()
            .map(|m| (m.id, m.full_name()))
            .collect();
        Self { names }
    }

    pub fn resolve(&self, member_id: u32) -> &str {
        self.names
            .get(&member_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_MEMBER)
    }
}

/// Filter, sort and paginate the members list. Pure, recomputed
/// from the current inputs on every render.
pub fn member_page(members: &[Member], query: &MemberQuery) -> Page<Member> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<Member> = members
        .iter()
        .filter(|m| {
            let matches_search = m.first_name.to_lowercase().contains(&needle)
                || m.last_name.to_lowercase().contains(&needle);
            matches_search && query.membership_type.matches(m.membership_type)
        })
        .cloned()
        .collect();

    // Stable sort, ties keep their source order
    match query.sort {
        SortOrder::Desc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Asc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    paginate(&rows, query.page)
}

/// Filter, sort and paginate the payments list. The search term
/// matches against the resolved member name.
pub fn payment_page(
    payments: &[Payment],
    names: &NameIndex,
    query: &PaymentQuery,
) -> Page<Payment> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<Payment> = payments
        .iter()
        .filter(|p| {
            let member_name = names.resolve(p.member_id).to_lowercase();
            member_name.contains(&needle)
                && query.payment_type.matches(p.payment_type)
                && query.month.matches(p.date)
        })
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Desc => rows.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Asc => rows.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    paginate(&rows, query.page)
}
