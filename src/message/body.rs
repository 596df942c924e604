//! SML message bodies.

use std::fmt;

use crate::constants::{
    SML_CLOSE_RESPONSE_FIELDS, SML_MESSAGE_BODY_FIELDS, SML_OPEN_RESPONSE_FIELDS,
};
use crate::error::DecodeError;
use crate::message::list_response::GetListResponse;
use crate::message::schema::{
    expect_fields, octet_string, optional, optional_octet_string, unsigned,
};
use crate::message::time::SmlTime;
use crate::payload::DecodedNode;

/// The closed set of SML message body tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MessageTag {
    OpenRequest = 0x0000_0100,
    OpenResponse = 0x0000_0101,
    CloseRequest = 0x0000_0200,
    CloseResponse = 0x0000_0201,
    GetProfilePackRequest = 0x0000_0300,
    GetProfilePackResponse = 0x0000_0301,
    GetProfileListRequest = 0x0000_0400,
    GetProfileListResponse = 0x0000_0401,
    GetProcParameterRequest = 0x0000_0500,
    GetProcParameterResponse = 0x0000_0501,
    SetProcParameterRequest = 0x0000_0600,
    GetListRequest = 0x0000_0700,
    GetListResponse = 0x0000_0701,
    AttentionResponse = 0x0000_FF01,
}

impl MessageTag {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageTag::OpenRequest => "SML_PublicOpen.Req",
            MessageTag::OpenResponse => "SML_PublicOpen.Res",
            MessageTag::CloseRequest => "SML_PublicClose.Req",
            MessageTag::CloseResponse => "SML_PublicClose.Res",
            MessageTag::GetProfilePackRequest => "SML_GetProfilePack.Req",
            MessageTag::GetProfilePackResponse => "SML_GetProfilePack.Res",
            MessageTag::GetProfileListRequest => "SML_GetProfileList.Req",
            MessageTag::GetProfileListResponse => "SML_GetProfileList.Res",
            MessageTag::GetProcParameterRequest => "SML_GetProcParameter.Req",
            MessageTag::GetProcParameterResponse => "SML_GetProcParameter.Res",
            MessageTag::SetProcParameterRequest => "SML_SetProcParameter.Req",
            MessageTag::GetListRequest => "SML_GetList.Req",
            MessageTag::GetListResponse => "SML_GetList.Res",
            MessageTag::AttentionResponse => "SML_Attention.Res",
        }
    }
}

impl TryFrom<u32> for MessageTag {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let tag = match value {
            0x0000_0100 => MessageTag::OpenRequest,
            0x0000_0101 => MessageTag::OpenResponse,
            0x0000_0200 => MessageTag::CloseRequest,
            0x0000_0201 => MessageTag::CloseResponse,
            0x0000_0300 => MessageTag::GetProfilePackRequest,
            0x0000_0301 => MessageTag::GetProfilePackResponse,
            0x0000_0400 => MessageTag::GetProfileListRequest,
            0x0000_0401 => MessageTag::GetProfileListResponse,
            0x0000_0500 => MessageTag::GetProcParameterRequest,
            0x0000_0501 => MessageTag::GetProcParameterResponse,
            0x0000_0600 => MessageTag::SetProcParameterRequest,
            0x0000_0700 => MessageTag::GetListRequest,
            0x0000_0701 => MessageTag::GetListResponse,
            0x0000_FF01 => MessageTag::AttentionResponse,
            other => {
                return Err(DecodeError::schema(format!(
                    "unknown message body tag 0x{other:08X}"
                )))
            }
        };
        Ok(tag)
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:4X}", self.code())
    }
}

/// Body of an SML_PublicOpen.Res message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenResponse {
    pub codepage: Option<Vec<u8>>,
    pub client_id: Option<Vec<u8>>,
    pub req_file_id: Vec<u8>,
    pub server_id: Vec<u8>,
    pub ref_time: Option<SmlTime>,
    pub sml_version: Option<u8>,
}

impl OpenResponse {
    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [codepage, client_id, req_file_id, server_id, ref_time, sml_version] =
            expect_fields::<SML_OPEN_RESPONSE_FIELDS>(node, "SML_PublicOpen.Res")?;
        Ok(OpenResponse {
            codepage: optional_octet_string(codepage, "codepage")?,
            client_id: optional_octet_string(client_id, "clientId")?,
            req_file_id: octet_string(req_file_id, "reqFileId")?,
            server_id: octet_string(server_id, "serverId")?,
            ref_time: optional(ref_time, SmlTime::from_node)?,
            sml_version: optional(sml_version, |n| unsigned(n, "smlVersion"))?,
        })
    }
}

/// Body of an SML_PublicClose.Res message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseResponse {
    pub global_signature: Option<Vec<u8>>,
}

impl CloseResponse {
    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [global_signature] =
            expect_fields::<SML_CLOSE_RESPONSE_FIELDS>(node, "SML_PublicClose.Res")?;
        Ok(CloseResponse {
            global_signature: optional_octet_string(global_signature, "globalSignature")?,
        })
    }
}

/// A message body, keyed by its tag.
///
/// Bodies the decoder does not model keep their payload as a generic node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    OpenResponse(OpenResponse),
    CloseResponse(CloseResponse),
    GetListResponse(GetListResponse),
    Other { tag: MessageTag, payload: DecodedNode },
}

impl MessageBody {
    pub fn tag(&self) -> MessageTag {
        match self {
            MessageBody::OpenResponse(_) => MessageTag::OpenResponse,
            MessageBody::CloseResponse(_) => MessageTag::CloseResponse,
            MessageBody::GetListResponse(_) => MessageTag::GetListResponse,
            MessageBody::Other { tag, .. } => *tag,
        }
    }

    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [tag, payload] = expect_fields::<SML_MESSAGE_BODY_FIELDS>(node, "SML_MessageBody")?;
        let tag = MessageTag::try_from(unsigned::<u32>(tag, "SML_MessageBody tag")?)?;

        Ok(match tag {
            MessageTag::OpenResponse => MessageBody::OpenResponse(OpenResponse::from_node(payload)?),
            MessageTag::CloseResponse => {
                MessageBody::CloseResponse(CloseResponse::from_node(payload)?)
            }
            MessageTag::GetListResponse => {
                MessageBody::GetListResponse(GetListResponse::from_node(payload)?)
            }
            tag => MessageBody::Other { tag, payload },
        })
    }
}
