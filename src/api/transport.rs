use std::{fmt::Display, time::Duration};

/// Запрос к внешнему сервису.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Body,
    pub timeout: Duration,
}

impl Request {
    pub fn get(url: &str, timeout: Duration) -> Self {
        Self {
            method: Method::Get,
            url: url.to_owned(),
            headers: Vec::new(),
            body: Body::Empty,
            timeout,
        }
    }

    pub fn post(url: &str, body: Body, timeout: Duration) -> Self {
        Self {
            method: Method::Post,
            url: url.to_owned(),
            headers: Vec::new(),
            body,
            timeout,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Ищет значение заголовка без учёта регистра имени.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Тело запроса.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,

    /// application/x-www-form-urlencoded
    Form(Vec<(&'static str, String)>),

    /// multipart/form-data, только текстовые поля.
    Multipart(Vec<(&'static str, String)>),
}

impl Body {
    /// Возвращает значение поля формы, если оно есть.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Body::Empty => None,
            Body::Form(fields) | Body::Multipart(fields) => fields
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str()),
        }
    }
}

/// Ответ внешнего сервиса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Тело ответа как текст. Невалидные UTF-8 последовательности заменяются.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Способ выполнить HTTP запрос.
///
/// Все вызовы блокирующие и ограничены `Request::timeout`.
pub trait Transport {
    fn send(&self, request: Request) -> TransportResult;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> TransportResult {
        (**self).send(request)
    }
}

pub type TransportResult = std::result::Result<Response, TransportError>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("build http client")]
    Build(#[source] reqwest::Error),

    #[error("{0}")]
    Other(String),
}
