use hmac::Mac;
use tradebook_model::error::SocketError;

use self::encoder::Encoder;

use super::{builder::HttpRequestBuilder, rest::request::RestRequest};

pub mod encoder;

/// API specific signing logic used by a [`RequestSigner`].
pub trait Signer {
    /// Configuration required to sign the [`RestRequest`]s for this API server.
    type Config<'a>
    where
        Self: 'a;

    /// Generates a [`Self::Config`] for this [`RestRequest`] and [`reqwest::RequestBuilder`].
    fn config<'a, Request>(
        &'a self,
        request: Request,
        builder: &reqwest::RequestBuilder,
    ) -> Result<Self::Config<'a>, SocketError>
    where
        Request: RestRequest;

    /// Generate the bytes to sign from the provided [`Self::Config`].
    fn add_bytes_to_sign<M>(mac: &mut M, config: &Self::Config<'_>)
    where
        M: Mac;

    /// Build a signed [`reqwest::Request`] from the provided [`Self::Config`],
    /// [`reqwest::RequestBuilder`], and generated cryptographic signature `String`.
    fn build_signed_request(
        config: Self::Config<'_>,
        builder: reqwest::RequestBuilder,
        signature: String,
    ) -> Result<reqwest::Request, SocketError>;
}

/// Generically signs [`RestRequest`]s for any API: the [`Signer`] decides which bytes are
/// signed and where the signature goes, `Hmac` computes it, and the [`Encoder`] renders it.
#[derive(Debug, Copy, Clone)]
pub struct RequestSigner<Sig, Hmac, SigEncoder> {
    signer: Sig,
    mac: Hmac,
    encoder: SigEncoder,
}

impl<Sig, Hmac, SigEncoder> HttpRequestBuilder for RequestSigner<Sig, Hmac, SigEncoder>
where
    Sig: Signer,
    Hmac: Mac + Clone,
    SigEncoder: Encoder,
{
    fn build<Request>(
        &self,
        request: Request,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Request, SocketError>
    where
        Request: RestRequest,
    {
        let config = self.signer.config(request, &builder)?;

        // Keyed mac is cloned so the secret is only ever processed once
        let mut mac = self.mac.clone();
        Sig::add_bytes_to_sign(&mut mac, &config);

        let bytes_to_encode = mac.finalize().into_bytes();
        let signature = self.encoder.encode(bytes_to_encode);

        Sig::build_signed_request(config, builder, signature)
    }
}

impl<Sig, Hmac, SigEncoder> RequestSigner<Sig, Hmac, SigEncoder> {
    pub fn new(signer: Sig, mac: Hmac, encoder: SigEncoder) -> Self {
        Self {
            signer,
            mac,
            encoder,
        }
    }
}
