use crate::artifacts::filter::{CommitFilter, IncludeDecision, equals};
use crate::artifacts::objects::commit::{Commit, Person};

/// Which identity of a commit a person filter inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Author,
    Committer,
}

impl PersonRole {
    fn person<'c>(&self, commit: &'c Commit) -> &'c Person {
        match self {
            PersonRole::Author => commit.author(),
            PersonRole::Committer => commit.committer(),
        }
    }
}

/// What a person filter compares
///
/// Every comparison is null-aware: an absent expected value matches only an
/// absent field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonCriteria {
    Name(Option<String>),
    Email(Option<String>),
    Identity {
        name: Option<String>,
        email: Option<String>,
    },
}

impl PersonCriteria {
    fn matches(&self, person: &Person) -> bool {
        match self {
            PersonCriteria::Name(name) => equals(name.as_deref(), person.name()),
            PersonCriteria::Email(email) => equals(email.as_deref(), person.email()),
            PersonCriteria::Identity { name, email } => {
                equals(name.as_deref(), person.name()) && equals(email.as_deref(), person.email())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersonFilter {
    role: PersonRole,
    criteria: PersonCriteria,
    stop: bool,
}

impl PersonFilter {
    pub fn new(role: PersonRole, criteria: PersonCriteria) -> Self {
        Self {
            role,
            criteria,
            stop: false,
        }
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    pub fn role(&self) -> PersonRole {
        self.role
    }
}

impl CommitFilter for PersonFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        let person = self.role.person(commit);
        IncludeDecision::from_match(self.criteria.matches(person), self.stop)
    }

    fn reset(&mut self) {}
}

/// Constructors for author filters
pub struct AuthorFilter;

impl AuthorFilter {
    pub fn name(name: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Author,
            PersonCriteria::Name(name.map(str::to_string)),
        )
    }

    pub fn email(email: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Author,
            PersonCriteria::Email(email.map(str::to_string)),
        )
    }

    pub fn identity(name: Option<&str>, email: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Author,
            PersonCriteria::Identity {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
            },
        )
    }
}

/// Constructors for committer filters
pub struct CommitterFilter;

impl CommitterFilter {
    pub fn name(name: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Committer,
            PersonCriteria::Name(name.map(str::to_string)),
        )
    }

    pub fn email(email: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Committer,
            PersonCriteria::Email(email.map(str::to_string)),
        )
    }

    pub fn identity(name: Option<&str>, email: Option<&str>) -> PersonFilter {
        PersonFilter::new(
            PersonRole::Committer,
            PersonCriteria::Identity {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
            },
        )
    }
}
