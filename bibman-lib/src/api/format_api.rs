use crate::{ast::Biblio, format::Format, Error, ErrorKind};

use super::Client;

pub(crate) fn get_entries_by_url<C: Client, F: Format>(url: &str) -> Result<Biblio, Error> {
    let client = C::default();

    let text = client.get_text(url)?;
    if text.is_empty() {
        return Err(Error::new(
            ErrorKind::NoValue,
            "Request did not find any results",
        ));
    }

    let biblio = F::new(text).parse()?;

    // a total parser reports unparseable text as zero entries, which is a
    // failed lookup from the caller's point of view
    if biblio.entries().next().is_none() {
        Err(Error::new(
            ErrorKind::NoValue,
            "Response did not contain any bibliographic entries",
        ))
    } else {
        Ok(biblio)
    }
}

#[cfg(test)]
mod tests {

    use crate::{
        api::{MockClient, Respond},
        format::BibTex,
        Error, ErrorKind,
    };

    use super::get_entries_by_url;

    struct BrokenNetwork;

    impl Respond for BrokenNetwork {
        fn response() -> Result<String, Error> {
            Err(Error::new(ErrorKind::IO, "Network error"))
        }
    }

    struct ProseText;

    impl Respond for ProseText {
        fn response() -> Result<String, Error> {
            Ok("This is not valid BibTeX".to_owned())
        }
    }

    struct SingleEntry;

    impl Respond for SingleEntry {
        fn response() -> Result<String, Error> {
            Ok("@manual{cite, title={This is a title},}".to_owned())
        }
    }

    #[test]
    fn client_text_error() {
        let err = get_entries_by_url::<MockClient<BrokenNetwork>, BibTex>("test")
            .expect_err("BrokenNetwork should always cause an error");

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn text_without_entries_is_a_no_value_error() {
        let err = get_entries_by_url::<MockClient<ProseText>, BibTex>("test")
            .expect_err("ProseText parses to zero entries");

        assert_eq!(ErrorKind::NoValue, err.kind());
    }

    #[test]
    fn valid_entry_returns_biblio() {
        let biblio = get_entries_by_url::<MockClient<SingleEntry>, BibTex>("test")
            .expect("SingleEntry should always produce an ok response");

        let entry = biblio.into_entries().remove(0);

        assert_eq!("cite", entry.cite);
        assert_eq!(Some("This is a title"), entry.title());
    }
}
