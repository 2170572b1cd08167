//! Credential profiles for API access.
//!
//! Profiles live in a YAML file (`~/.trc` by default) that maps a
//! username and consumer key to a full set of credentials.

mod rcfile;

pub use rcfile::{Credentials, RcFile};
