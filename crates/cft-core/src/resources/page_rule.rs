//! `cloudflare_page_rule` rendering
//!
//! ```text
//! resource "cloudflare_page_rule" "page_rule_<id>" {
//!     zone_id = "<zone id>"
//!     target = "<pattern>"
//!     priority = <priority>
//!     status = "<status>"
//!     actions {
//!         <action> = <scalar>
//!         <action> {
//!             <key> = <scalar>
//!         }
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::hcl::{Block, Scalar, Value, validate_identifier};
use crate::model::{PageRule, Zone};

/// Terraform resource type for page rules
pub const RESOURCE_TYPE: &str = "cloudflare_page_rule";

/// Terraform resource name for a rule: `page_rule_<id>`
pub fn resource_name(rule: &PageRule) -> String {
    format!("page_rule_{}", rule.id)
}

/// Build the resource block for one page rule.
///
/// Fails with a render error when the priority or an action value has a
/// shape HCL page rule arguments cannot express (null, list, or a mapping
/// nested inside a mapping), or when an action id or mapping key is not a
/// valid identifier.
pub fn render_page_rule(rule: &PageRule, zone: &Zone) -> Result<Block> {
    let priority = Scalar::try_from(&rule.priority)
        .map_err(|e| Error::render(format!("page rule {}: priority: {}", rule.id, e)))?;

    let mut actions = Block::new("actions");
    for action in &rule.actions {
        validate_identifier(&action.id)
            .map_err(|e| Error::render(format!("page rule {}: action id: {}", rule.id, e)))?;
        let value = Value::try_from(&action.value).map_err(|e| {
            Error::render(format!("page rule {}: action {}: {}", rule.id, action.id, e))
        })?;
        actions.body_mut().value(action.id.clone(), &value);
    }

    let mut block = Block::new("resource")
        .with_label(RESOURCE_TYPE)
        .with_label(resource_name(rule));

    let body = block.body_mut();
    body.string_attribute("zone_id", &zone.id);
    for target in &rule.targets {
        body.string_attribute("target", &target.constraint.value);
    }
    body.attribute("priority", &priority)
        .string_attribute("status", &rule.status)
        .block(actions);

    Ok(block)
}

/// Shell command importing the rendered resource into Terraform state.
///
/// Returned without a trailing newline.
pub fn import_command(rule: &PageRule, zone: &Zone) -> String {
    format!(
        "terraform import {}.{} {}/{}",
        RESOURCE_TYPE,
        resource_name(rule),
        zone.id,
        rule.id
    )
}
