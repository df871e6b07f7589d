use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use std::str;

use crate::errors::DavError;
use crate::models::RemoteEntry;

#[derive(Debug, Default)]
struct ResponseAccumulator {
    href: String,
    is_directory: bool,
    size: Option<u64>,
}

/// Parses a WebDAV multistatus body into the entries it describes, in server
/// response order.
///
/// Element matching is on local names, so `D:response`, `d:response` and
/// un-prefixed `response` all parse the same. Directory detection and size
/// lookup are a union over all propstat blocks of a response: a response is a
/// directory iff any block carries a `resourcetype/collection` marker, and a
/// file's size comes from whichever block carries `getcontentlength`
/// (defaulting to 0 when none does).
pub fn parse_multistatus(xml_text: &str) -> Result<Vec<RemoteEntry>, DavError> {
    let mut reader = Reader::from_str(xml_text);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current_response: Option<ResponseAccumulator> = None;
    let mut current_element = String::new();
    let mut saw_multistatus = false;
    let mut in_resourcetype = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = get_local_name(&e)?;

                match name.as_str() {
                    "multistatus" => {
                        saw_multistatus = true;
                    }
                    "response" => {
                        current_response = Some(ResponseAccumulator::default());
                        // a self-closed <resourcetype/> emits no End event,
                        // so the flag is reset per response
                        in_resourcetype = false;
                    }
                    "resourcetype" => {
                        in_resourcetype = true;
                    }
                    "collection" if in_resourcetype => {
                        if let Some(ref mut resp) = current_response {
                            resp.is_directory = true;
                        }
                    }
                    _ => {
                        current_element = name;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| DavError::parse(format!("bad text node: {}", e)))?;
                let text = text.trim();

                if text.is_empty() {
                    continue;
                }

                if let Some(ref mut resp) = current_response {
                    match current_element.as_str() {
                        "href" => {
                            resp.href = text.to_string();
                        }
                        "getcontentlength" => {
                            if resp.size.is_none() {
                                resp.size = text.parse().ok();
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = get_local_name_from_end(&e)?;

                match name.as_str() {
                    "response" => {
                        if let Some(resp) = current_response.take() {
                            // Responses without an href carry nothing usable
                            if !resp.href.is_empty() {
                                entries.push(RemoteEntry {
                                    href: resp.href,
                                    is_directory: resp.is_directory,
                                    size: if resp.is_directory {
                                        None
                                    } else {
                                        Some(resp.size.unwrap_or(0))
                                    },
                                });
                            }
                        }
                    }
                    "resourcetype" => {
                        in_resourcetype = false;
                    }
                    _ => {}
                }

                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DavError::parse(format!("XML parsing error: {}", e))),
            _ => {}
        }

        buf.clear();
    }

    if !saw_multistatus {
        return Err(DavError::parse("no multistatus element in response body"));
    }

    Ok(entries)
}

fn get_local_name(e: &BytesStart) -> Result<String, DavError> {
    let qname = e.name();
    let local = qname.local_name();
    str::from_utf8(local.as_ref())
        .map(|name| name.to_string())
        .map_err(|e| DavError::parse(format!("invalid UTF-8 in element name: {}", e)))
}

fn get_local_name_from_end(e: &BytesEnd) -> Result<String, DavError> {
    let qname = e.name();
    let local = qname.local_name();
    str::from_utf8(local.as_ref())
        .map(|name| name.to_string())
        .map_err(|e| DavError::parse(format!("invalid UTF-8 in element name: {}", e)))
}
