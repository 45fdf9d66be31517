pub mod admins;
pub mod allowed_keys;
pub mod cidr;
pub mod custom_hosts;
pub mod resources;

pub use admins::{AdminFormError, AdministratorDraft, AdministratorList, AdministratorRecord};
pub use allowed_keys::{AllowedKeyList, AllowedKeyRecord};
pub use cidr::{CidrError, CidrLists, CidrPortal, CIDR_PORTALS};
pub use custom_hosts::{HostFormError, KeycloakHost, KeycloakHostEditor};
pub use resources::{
    ConfigNode, EnvVar, ResourceCategory, ResourceEditor, ResourceOverride, ALL_RESOURCE_CATEGORIES,
};
