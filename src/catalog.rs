//! Fixed vocabularies offered by the prompts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which artifact a property tree belongs to. Decides which prompts fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Model,
    Schema,
    Api,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Model => "MODEL",
            Mode::Schema => "SCHEMA",
            Mode::Api => "API",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Label shown for "no format" in format lists.
pub const FORMAT_NONE: &str = "none";

const STRING_FORMATS: &[&str] = &[
    FORMAT_NONE,
    "date",
    "date-time",
    "password",
    "byte",
    "binary",
    "email",
    "uuid",
    "hostname",
    "ipv4",
    "ipv6",
    "uri",
    "uri-reference",
    "uri-template",
    "json-pointer",
    "relative-json-pointer",
    "regex",
];
const NUMBER_FORMATS: &[&str] = &[FORMAT_NONE, "float", "double"];
const INTEGER_FORMATS: &[&str] = &[FORMAT_NONE, "int32", "int64"];

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::String,
        Kind::Number,
        Kind::Integer,
        Kind::Boolean,
        Kind::Array,
        Kind::Object,
    ];

    /// Kinds a parameter schema may take.
    pub const PRIMITIVE: [Kind; 4] = [Kind::String, Kind::Number, Kind::Integer, Kind::Boolean];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Allowed formats, "none" first. Empty for kinds that never carry a format.
    pub fn formats(&self) -> &'static [&'static str] {
        match self {
            Kind::String => STRING_FORMATS,
            Kind::Number => NUMBER_FORMATS,
            Kind::Integer => INTEGER_FORMATS,
            Kind::Boolean | Kind::Array | Kind::Object => &[],
        }
    }

    pub fn is_formattable(&self) -> bool {
        !self.formats().is_empty()
    }

    pub fn is_examplable(&self) -> bool {
        matches!(self, Kind::String | Kind::Number | Kind::Integer | Kind::Boolean)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Number | Kind::Integer)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Upper-case name shown in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Lower-case key used in path documents.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }

    pub fn from_key(key: &str) -> Option<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(key))
    }

    pub fn accepts_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }

    /// Status codes that make sense as responses to this method.
    pub fn status_codes(&self) -> &'static [u16] {
        match self {
            HttpMethod::Get => &[200, 206, 304, 400, 401, 403, 404, 500],
            HttpMethod::Post => &[200, 201, 202, 400, 401, 403, 404, 409, 422, 500],
            HttpMethod::Put => &[200, 201, 204, 400, 401, 403, 404, 409, 422, 500],
            HttpMethod::Patch => &[200, 204, 400, 401, 403, 404, 409, 422, 500],
            HttpMethod::Delete => &[200, 202, 204, 400, 401, 403, 404, 500],
            HttpMethod::Head => &[200, 304, 400, 401, 403, 404, 500],
            HttpMethod::Options => &[200, 204, 400, 500],
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Response",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub const ALL: [ParamLocation; 4] = [
        ParamLocation::Path,
        ParamLocation::Query,
        ParamLocation::Header,
        ParamLocation::Cookie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MEDIA_TYPES: &[&str] = &[
    "application/json",
    "text/plain",
    "text/html",
    "text/xml",
    "text/css",
    "text/javascript",
    "text/csv",
    "text/event-stream",
    "application/json-patch+json",
    "application/ld+json",
    "application/vnd.api+json",
    "application/xml",
    "application/atom+xml",
    "application/rss+xml",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/x-www-form-urlencoded",
    "application/xhtml+xml",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "application/msword",
    "multipart/form-data",
    "multipart/byteranges",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/svg+xml",
    "audio/mpeg",
    "audio/ogg",
    "audio/wav",
    "video/mp4",
    "video/ogg",
    "video/webm",
];
