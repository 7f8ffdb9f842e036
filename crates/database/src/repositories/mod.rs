pub mod animals;
pub mod members;
pub mod memberships;
pub mod organizations;
