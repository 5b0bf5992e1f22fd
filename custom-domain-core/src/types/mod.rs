//! Core types

mod domain;
mod provisioning;
mod site;

pub use domain::DomainName;
pub use provisioning::{
    FullZoneResult, LANDING_PAGE_ID_FIELD, ROOT_RECORD_NAME, SITE_ID_FIELD, SiteRequest,
    WWW_RECORD_NAME, ZoneTeardown,
};
pub use site::{
    CurrentUser, CustomDomain, Page, PageMetadata, ResourceId, Site, SiteMetadata, UserRef,
};
