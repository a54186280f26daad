//! Configuration section definitions.
//!
//! Each module corresponds to a section in `prerender.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `site`     | `[site]`       | Origin, name, navigation menu        |
//! | `paths`    | `[paths]`      | Stage inputs and outputs             |
//! | `routes`   | `[[routes]]`   | Per-route SEO metadata table         |
//! | `validate` | `[validate]`   | Readiness check settings             |

mod paths;
mod routes;
mod site;
mod validate;

pub use paths::PathsConfig;
pub use routes::RouteEntry;
pub use site::{NavItem, SiteSectionConfig};
pub use validate::ValidateConfig;
