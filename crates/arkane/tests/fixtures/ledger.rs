// Woven by build.rs into $OUT_DIR/ledger.rs.

use arkane::core::HashCode;

#[derive(Clone, Copy, Debug)]
pub enum Side {
    Debit,
    Credit,
}

#[derive(Clone, Debug)]
#[structural_equality]
pub struct Entry {
    pub account: String,
    pub side: Side,
    pub cents: i64,
    #[ignore_during_equals]
    pub currency: String,
    #[ignore_during_equals]
    pub memo: Option<String>,
}

impl Entry {
    #[additional_equality]
    fn same_currency(&self, other: &Self) -> bool {
        self.currency.eq_ignore_ascii_case(&other.currency)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        arkane::operator()
    }
}

#[derive(Clone, Debug)]
#[structural_equality(type_check = "same_type_or_subtype")]
pub struct Journal {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl PartialEq for Journal {
    fn eq(&self, other: &Self) -> bool {
        arkane::operator()
    }
}

#[derive(Clone, Debug)]
#[structural_equality]
pub struct AuditedJournal {
    #[base]
    pub journal: Journal,
    pub auditor: String,
}

impl AuditedJournal {
    #[additional_hash]
    fn auditor_len(&self) -> i32 {
        self.auditor.len().hash_code()
    }
}

impl PartialEq for AuditedJournal {
    fn eq(&self, other: &Self) -> bool {
        arkane::operator()
    }
}
