// Routing segregation mirrors the access tiers of the console:
// - public: login page/action, logout, health; reachable without a session.
// - protected: the dashboard, behind the redirect gate only.
// - admin: the management pages, additionally wrapped by the role gate.

pub mod admin;
pub mod protected;
pub mod public;
