//! SML_GetList.Res, the body meters use to push their register readings.

use serde::Serialize;

use crate::constants::{SML_GET_LIST_RESPONSE_FIELDS, SML_LIST_ENTRY_FIELDS};
use crate::error::DecodeError;
use crate::message::schema::{
    expect_fields, expect_list, integer, octet_string, optional, optional_octet_string, unsigned,
};
use crate::message::time::SmlTime;
use crate::obis::ObisCode;
use crate::payload::DecodedNode;

/// The value of a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SmlValue {
    OctetString(Vec<u8>),
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
}

impl SmlValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, SmlValue::Integer(_) | SmlValue::Unsigned(_))
    }

    fn from_node(node: DecodedNode) -> Result<Option<Self>, DecodeError> {
        match node {
            DecodedNode::Optional => Ok(None),
            DecodedNode::OctetString(bytes) => Ok(Some(SmlValue::OctetString(bytes))),
            DecodedNode::Boolean(value) => Ok(Some(SmlValue::Boolean(value))),
            DecodedNode::Integer(value, _) => Ok(Some(SmlValue::Integer(value))),
            DecodedNode::Unsigned(value, _) => Ok(Some(SmlValue::Unsigned(value))),
            other @ (DecodedNode::List(_) | DecodedNode::EndOfMessage) => Err(DecodeError::schema(
                format!("SML_ListEntry value: unsupported {}", other.kind()),
            )),
        }
    }
}

/// One register of a list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub obj_name: ObisCode,
    pub status: Option<u64>,
    pub val_time: Option<SmlTime>,
    /// DLMS/COSEM unit code, only kept for numeric values.
    pub unit: Option<u8>,
    /// Power-of-ten exponent, only kept for numeric values.
    pub scaler: Option<i8>,
    /// `None` when the meter left the value out.
    pub value: Option<SmlValue>,
    pub value_signature: Option<Vec<u8>>,
}

impl ListEntry {
    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [obj_name, status, val_time, unit, scaler, value, value_signature] =
            expect_fields::<SML_LIST_ENTRY_FIELDS>(node, "SML_ListEntry")?;

        let obj_name = octet_string(obj_name, "objName")?;
        let obj_name = ObisCode::from_bytes(&obj_name).ok_or_else(|| {
            DecodeError::schema(format!(
                "objName: expected 6 bytes, found {}",
                obj_name.len()
            ))
        })?;

        let mut entry = ListEntry {
            obj_name,
            status: optional(status, |n| unsigned(n, "status"))?,
            val_time: optional(val_time, SmlTime::from_node)?,
            unit: optional(unit, |n| unsigned(n, "unit"))?,
            scaler: optional(scaler, |n| integer(n, "scaler"))?,
            value: SmlValue::from_node(value)?,
            value_signature: optional_octet_string(value_signature, "valueSignature")?,
        };

        let numeric = entry.value.as_ref().map_or(true, SmlValue::is_numeric);
        if !numeric && (entry.unit.is_some() || entry.scaler.is_some()) {
            log::debug!(
                "Dropping unit/scaler of non-numeric entry {}",
                entry.obj_name
            );
            entry.unit = None;
            entry.scaler = None;
        }

        Ok(entry)
    }
}

/// Body of an SML_GetList.Res message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetListResponse {
    pub client_id: Option<Vec<u8>>,
    pub server_id: Vec<u8>,
    pub list_name: Option<Vec<u8>>,
    pub act_sensor_time: Option<SmlTime>,
    pub val_list: Vec<ListEntry>,
    pub list_signature: Option<Vec<u8>>,
    pub act_gateway_time: Option<SmlTime>,
}

impl GetListResponse {
    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [client_id, server_id, list_name, act_sensor_time, val_list, list_signature, act_gateway_time] =
            expect_fields::<SML_GET_LIST_RESPONSE_FIELDS>(node, "SML_GetList.Res")?;

        let val_list = expect_list(val_list, "valList")?
            .into_iter()
            .map(ListEntry::from_node)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GetListResponse {
            client_id: optional_octet_string(client_id, "clientId")?,
            server_id: octet_string(server_id, "serverId")?,
            list_name: optional_octet_string(list_name, "listName")?,
            act_sensor_time: optional(act_sensor_time, SmlTime::from_node)?,
            val_list,
            list_signature: optional_octet_string(list_signature, "listSignature")?,
            act_gateway_time: optional(act_gateway_time, SmlTime::from_node)?,
        })
    }
}
