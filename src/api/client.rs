use std::time::Duration;

use log::debug;
use reqwest::blocking::multipart;

use super::transport::{Body, Method, Request, Response, Transport, TransportError, TransportResult};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// HTTP клиент поверх блокирующего reqwest.
///
/// Таймаут задаётся на каждый запрос отдельно, клиентский таймаут служит
/// только верхней границей для соединения.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// Создаёт новый инстанс клиента.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(TransportError::Build)?;

        Ok(Self { client })
    }

    fn build(&self, request: Request) -> reqwest::blocking::RequestBuilder {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        builder = builder.timeout(request.timeout);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        match request.body {
            Body::Empty => builder,
            Body::Form(fields) => builder.form(&fields),
            Body::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                builder.multipart(form)
            }
        }
    }
}

impl Transport for HttpClient {
    fn send(&self, request: Request) -> TransportResult {
        let url = request.url.clone();

        debug!("Запрос: {} {}", request.method, url);
        let resp = self
            .build(request)
            .send()
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        debug!("Ответ на {}: статус {}, {} байт", url, status, body.len());

        Ok(Response::new(status, body.to_vec()))
    }
}
