use crate::field::{self, FieldMap};
use crate::protocols::{annotate_uint, header, require_len};
use crate::semantics;
use crate::{DecodeError, Frame, ProtocolRecord, hex};

use super::layout;

/// True when the header frame-type word carries the host request marker.
///
/// Checked at the fixed header position rather than anywhere in the buffer:
/// `df0d` can legitimately appear inside payload bytes.
pub(crate) fn has_request_marker(buffer: &str) -> bool {
    let start = header::FRAME_TYPE_OFFSET * 2;
    buffer.get(start..start + layout::REQUEST_MARKER.len()) == Some(layout::REQUEST_MARKER)
}

/// Decode a QR-payment host request frame.
pub fn decode_qr_request(input: &str) -> Result<ProtocolRecord, DecodeError> {
    let buffer = hex::clean(input);
    require_len(&buffer, layout::REQUEST_MIN_HEX_CHARS)?;

    // The response marker embeds the request marker, so both checks are
    // needed to disambiguate the two captures.
    if !has_request_marker(&buffer) || buffer.contains(layout::RESPONSE_MARKER) {
        return Err(DecodeError::WrongVariant {
            expected: "QR payment host request",
        });
    }

    let mut header = FieldMap::from_table(&buffer, &header::HOST_HEADER)?;
    let mut body = FieldMap::from_table(&buffer, &layout::REQUEST_BODY)?;
    annotate_request(&mut header, &mut body);
    let checksum = field::checksum(&buffer)?;

    Ok(ProtocolRecord::QrRequest(Frame {
        header,
        body,
        checksum,
        raw_data: buffer,
    }))
}

/// Decode a QR-payment device response frame.
pub fn decode_qr_response(input: &str) -> Result<ProtocolRecord, DecodeError> {
    let buffer = hex::clean(input);
    require_len(&buffer, layout::RESPONSE_MIN_HEX_CHARS)?;

    if !buffer.contains(layout::RESPONSE_MARKER) {
        return Err(DecodeError::WrongVariant {
            expected: "QR payment device response",
        });
    }

    let header = FieldMap::from_table(&buffer, &header::DEVICE_HEADER)?;
    let mut body = FieldMap::from_table(&buffer, &layout::RESPONSE_BODY)?;
    annotate_response(&mut body);
    let checksum = field::checksum(&buffer)?;

    Ok(ProtocolRecord::QrResponse(Frame {
        header,
        body,
        checksum,
        raw_data: buffer,
    }))
}

/// Decode a QR-payment capture, sniffing the marker to pick the branch.
///
/// A failing branch is surfaced as a wrapped error naming that branch rather
/// than being swallowed or retried on the other path.
pub fn decode_qr(input: &str) -> Result<ProtocolRecord, DecodeError> {
    let buffer = hex::clean(input);
    if buffer.contains(layout::RESPONSE_MARKER) {
        decode_qr_response(&buffer).map_err(|err| DecodeError::Dispatch {
            branch: "QR payment device response",
            source: Box::new(err),
        })
    } else {
        decode_qr_request(&buffer).map_err(|err| DecodeError::Dispatch {
            branch: "QR payment host request",
            source: Box::new(err),
        })
    }
}

/// Semantic annotation pass for the request, in declared order.
fn annotate_request(header: &mut FieldMap, body: &mut FieldMap) {
    if let Some(frame_type) = header.get_mut("frameType") {
        frame_type.description = Some("df0d marks a QR payment host request".to_string());
    }
    annotate_uint(body, "cardStatus", semantics::card_status);
}

/// Semantic annotation pass for the response: the status description reads
/// across to the card id.
fn annotate_response(body: &mut FieldMap) {
    let status = body.get("status").and_then(|f| f.value.as_uint());
    let card = body
        .get("cardId")
        .map(|f| (f.raw_hex.clone(), f.value.as_uint().unwrap_or(0)));
    if let (Some(status), Some((card_raw, card_id))) = (status, card) {
        let description = semantics::response_status(status as u8, &card_raw, card_id);
        if let Some(field) = body.get_mut("status") {
            field.description = Some(description);
        }
    }
}
