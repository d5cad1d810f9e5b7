use serde::de::DeserializeOwned;

pub(crate) mod cross_ref;
pub(crate) mod format_api;

pub trait Client
where
    Self: Default,
{
    fn get_text(&self, url: &str) -> Result<String, Error>;
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let text = resp
            .text()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

        if text.is_empty() {
            Err(Error::new(ErrorKind::NoValue, "Response text is empty"))
        } else {
            Ok(text)
        }
    }

    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

#[cfg(test)]
pub(crate) use mock::{last_url, MockClient, Respond};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod mock {
    use std::{cell::RefCell, marker::PhantomData};

    use serde::de::DeserializeOwned;

    use super::Client;
    use crate::{Error, ErrorKind};

    thread_local! {
        static LAST_URL: RefCell<Option<String>> = RefCell::new(None);
    }

    /// The URL of the most recent request made through a [`MockClient`] on
    /// this thread.
    ///
    /// Lets tests check that the functions under test build the correct URL
    /// without any network involved.
    pub(crate) fn last_url() -> String {
        LAST_URL.with(|url| url.borrow().clone()).unwrap_or_default()
    }

    /// A canned response, injected into a [`MockClient`] at the type level so
    /// the functions under test stay generic over [`Client`].
    pub(crate) trait Respond {
        fn response() -> Result<String, Error>;
    }

    /// Responds with an empty string, the default when a test only cares
    /// about the request that was made.
    pub(crate) struct NoResponse;

    impl Respond for NoResponse {
        fn response() -> Result<String, Error> {
            Ok(String::new())
        }
    }

    pub(crate) struct MockClient<R: Respond = NoResponse> {
        _respond: PhantomData<R>,
    }

    impl<R: Respond> Default for MockClient<R> {
        fn default() -> Self {
            Self {
                _respond: PhantomData,
            }
        }
    }

    impl<R: Respond> Client for MockClient<R> {
        fn get_text(&self, url: &str) -> Result<String, Error> {
            LAST_URL.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            R::response()
        }

        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            LAST_URL.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            R::response().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }
}
