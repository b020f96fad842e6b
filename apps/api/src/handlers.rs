pub mod clinics;
pub mod health;
pub mod me;
pub mod pets;
pub mod plans;
pub mod subscriptions;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
