//! Domain models for the club-management entities

pub mod activity;
pub mod auth;
pub mod club;
pub mod common;
pub mod member;
pub mod payment;
pub mod property;
pub mod rbac;
pub mod sponsor;
pub mod user;

pub use activity::{Activity, CreateActivityInput, UpdateActivityInput};
pub use auth::{LoginInput, Profile, RefreshInput, TokenPair};
pub use club::{Club, CreateClubInput, UpdateClubInput};
pub use common::{EntityId, Envelope, ListPayload, Resource, ResourceKind};
pub use member::{CreateMemberInput, Member, MembershipStatus, UpdateMemberInput};
pub use payment::{CreatePaymentInput, Payment, PaymentMethod, PaymentStatus, UpdatePaymentInput};
pub use property::{CreatePropertyInput, Property, UpdatePropertyInput};
pub use rbac::{
    CreatePermissionInput, CreateRoleInput, Permission, Role, UpdatePermissionInput,
    UpdateRoleInput,
};
pub use sponsor::{CreateSponsorInput, Sponsor, UpdateSponsorInput};
pub use user::{CreateUserInput, UpdateUserInput, User};
