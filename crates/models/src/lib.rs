// Core modules
pub mod animal;
pub mod care;
pub mod member;
pub mod membership;
pub mod organization;

// Re-export commonly used types
pub use animal::{Animal, AnimalRecord, BirthDateError, CreateAnimal, Sex, UpdateAnimal};
pub use care::{age_display, CareStatus};
pub use member::{Member, MemberProfile, NewMember};
pub use membership::{
    MemberDirectory, Membership, MembershipDecision, MembershipRole, MembershipStatus,
    MembershipWithOrganization, PendingApproval,
};
pub use organization::{Organization, OrganizationSearchResult};
