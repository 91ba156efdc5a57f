// SPDX-License-Identifier: LGPL-3.0-only
//! Conversion between clipboard records and D-Bus `a{sv}` maps.

use std::collections::HashMap;

use npclip_core::object::clamp_percent;
use npclip_core::{ObjectState, ObjectSummary};
use thiserror::Error;
use zbus::zvariant::{OwnedValue, Value};

pub const NAME_KEY: &str = "NAME";
pub const PERCENT_KEY: &str = "PERCENT";
pub const ICON_KEY: &str = "ICON";
pub const PREVIEW_KEY: &str = "PREVIEW";
pub const ACTIVITY_KEY: &str = "ACTIVITY";
pub const FORMATS_KEY: &str = "FORMATS";

/// Attribute map as carried on the bus.
pub type WireMap = HashMap<String, OwnedValue>;

/// Errors decoding an attribute map.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("key '{key}' is not of type '{expected}'")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },
}

/// Encode the values sent with `object_state_changed`.
pub fn state_to_wire(state: &ObjectState) -> zbus::zvariant::Result<WireMap> {
    let mut map = WireMap::new();
    map.insert(NAME_KEY.into(), owned_value(state.name.clone())?);
    map.insert(PERCENT_KEY.into(), OwnedValue::from(i32::from(state.percent)));
    map.insert(ICON_KEY.into(), owned_value(state.icon.clone())?);
    map.insert(PREVIEW_KEY.into(), owned_value(state.preview.clone())?);
    map.insert(ACTIVITY_KEY.into(), owned_value(state.activity.clone())?);
    Ok(map)
}

/// Encode the reply of `get_object`.
pub fn summary_to_wire(summary: &ObjectSummary) -> zbus::zvariant::Result<WireMap> {
    let mut map = state_to_wire(&summary.state())?;
    map.insert(FORMATS_KEY.into(), owned_value(summary.format_types.clone())?);
    Ok(map)
}

pub fn state_from_wire(map: &WireMap) -> Result<ObjectState, WireError> {
    Ok(ObjectState {
        name: string_field(map, NAME_KEY)?,
        percent: percent_field(map)?,
        icon: string_field(map, ICON_KEY)?,
        preview: string_field(map, PREVIEW_KEY)?,
        activity: string_field(map, ACTIVITY_KEY)?,
    })
}

pub fn summary_from_wire(map: &WireMap) -> Result<ObjectSummary, WireError> {
    let state = state_from_wire(map)?;
    Ok(ObjectSummary {
        name: state.name,
        percent: state.percent,
        icon: state.icon,
        preview: state.preview,
        activity: state.activity,
        format_types: string_list_field(map, FORMATS_KEY)?,
    })
}

/// Convert a value to OwnedValue.
pub fn owned_value<T>(value: T) -> zbus::zvariant::Result<OwnedValue>
where
    Value<'static>: From<T>,
{
    OwnedValue::try_from(Value::from(value))
}

fn field<'a>(map: &'a WireMap, key: &'static str) -> Result<&'a Value<'static>, WireError> {
    map.get(key)
        .map(|value| &**value)
        .ok_or(WireError::MissingKey(key))
}

fn string_field(map: &WireMap, key: &'static str) -> Result<String, WireError> {
    match field(map, key)? {
        Value::Str(s) => Ok(s.as_str().to_string()),
        _ => Err(WireError::InvalidType { key, expected: "s" }),
    }
}

fn percent_field(map: &WireMap) -> Result<u8, WireError> {
    match field(map, PERCENT_KEY)? {
        Value::I32(percent) => Ok(clamp_percent(*percent)),
        _ => Err(WireError::InvalidType {
            key: PERCENT_KEY,
            expected: "i",
        }),
    }
}

fn string_list_field(map: &WireMap, key: &'static str) -> Result<Vec<String>, WireError> {
    let invalid = WireError::InvalidType { key, expected: "as" };
    match field(map, key)? {
        Value::Array(array) => array
            .inner()
            .iter()
            .map(|item| match item {
                Value::Str(s) => Ok(s.as_str().to_string()),
                _ => Err(invalid.clone()),
            })
            .collect(),
        _ => Err(invalid),
    }
}
