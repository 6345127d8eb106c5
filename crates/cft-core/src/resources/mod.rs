//! Terraform resource renderers
//!
//! Each supported Cloudflare resource kind has a module that turns one API
//! object into a resource [`Block`](crate::hcl::Block) and an import
//! command.

pub mod page_rule;

use std::fmt;

/// Resource kinds the exporter knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `cloudflare_page_rule`
    PageRule,
}

impl ResourceKind {
    /// Terraform resource type
    pub fn terraform_type(&self) -> &'static str {
        match self {
            ResourceKind::PageRule => page_rule::RESOURCE_TYPE,
        }
    }

    /// Prefix of the per-zone output files (`<prefix>-<zone>.<ext>`)
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ResourceKind::PageRule => "page-rules",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.terraform_type())
    }
}
