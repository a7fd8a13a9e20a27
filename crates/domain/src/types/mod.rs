//! Domain types and models
//!
//! Public shapes exchanged with the platform. Request encoding and response
//! envelopes live in `workwx-infra`; these are the values callers see.

pub mod appchat;
pub mod credential;
pub mod external_contact;
pub mod media;
pub mod message;
pub mod tag;
pub mod user;

pub use appchat::ChatInfo;
pub use credential::{ClientIdentity, Credential, CredentialGrant, CredentialKind};
pub use external_contact::{
    CorpTag, CorpTagGroup, ExternalContact, ExternalContactInfo, ExternalContactRemark,
    FollowUser, FollowUserTag,
};
pub use media::{Media, MediaType, MediaUploadResult};
pub use message::{MessageContent, MessageRecipients, MessageSendResult};
pub use tag::Tag;
pub use user::{DeptInfo, UserDetail, UserIdentityInfo};
