use super::{ResultSerializer, SPARQL_RESULTS_NS};
use crate::result::QueryResult;
use crate::SparqlDlError;
use dlconsult_rdf::Term;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// SPARQL Query Results XML Format
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    fn write_term<W: Write>(writer: &mut Writer<W>, term: &Term) -> quick_xml::Result<()> {
        let (element, value) = match term {
            Term::Iri(iri) => (BytesStart::new("uri"), iri.as_str()),
            Term::BlankNode(id) => (BytesStart::new("bnode"), id.as_str()),
            Term::Literal(literal) => {
                let mut element = BytesStart::new("literal");
                if let Some(language) = &literal.language {
                    element.push_attribute(("xml:lang", language.as_str()));
                } else if let Some(datatype) = &literal.datatype {
                    element.push_attribute(("datatype", datatype.as_str()));
                }
                (element, literal.lexical.as_str())
            }
        };

        let end = element.to_end().into_owned();
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(end))?;
        Ok(())
    }

    fn write_document<W: Write>(writer: &mut Writer<W>, result: &QueryResult) -> quick_xml::Result<()> {
        writer.write_event(Event::Start(
            BytesStart::new("sparql").with_attributes([("xmlns", SPARQL_RESULTS_NS)]),
        ))?;

        if let Some(boolean) = result.boolean() {
            writer.write_event(Event::Empty(BytesStart::new("head")))?;
            writer.write_event(Event::Start(BytesStart::new("boolean")))?;
            writer.write_event(Event::Text(BytesText::new(if boolean { "true" } else { "false" })))?;
            writer.write_event(Event::End(BytesEnd::new("boolean")))?;
            writer.write_event(Event::End(BytesEnd::new("sparql")))?;
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("head")))?;
        for variable in result.variables() {
            writer.write_event(Event::Empty(
                BytesStart::new("variable").with_attributes([("name", variable.name())]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("head")))?;

        writer.write_event(Event::Start(BytesStart::new("results")))?;
        for row in result.rows() {
            writer.write_event(Event::Start(BytesStart::new("result")))?;
            for variable in result.variables() {
                if let Some(term) = row.get(variable) {
                    writer.write_event(Event::Start(
                        BytesStart::new("binding").with_attributes([("name", variable.name())]),
                    ))?;
                    Self::write_term(writer, term)?;
                    writer.write_event(Event::End(BytesEnd::new("binding")))?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("result")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("results")))?;
        writer.write_event(Event::End(BytesEnd::new("sparql")))?;
        Ok(())
    }
}

impl ResultSerializer for XmlSerializer {
    fn write(&self, result: &QueryResult, out: &mut dyn Write) -> Result<(), SparqlDlError> {
        let mut writer = Writer::new(out);
        Self::write_document(&mut writer, result).map_err(|e| SparqlDlError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Variable;
    use crate::result::BindingRow;
    use dlconsult_rdf::Literal;

    #[test]
    fn test_select_document() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let mut first = BindingRow::new();
        first.insert(x.clone(), Term::iri("http://example.org/a&b"));
        first.insert(y.clone(), Term::Literal(Literal::lang("<hi>", "en")));
        let mut second = BindingRow::new();
        second.insert(x.clone(), Term::Literal(Literal::typed("7", "http://www.w3.org/2001/XMLSchema#integer")));

        let xml = XmlSerializer
            .render(&QueryResult::select(vec![x, y], vec![first, second]))
            .unwrap();

        assert_eq!(
            xml,
            concat!(
                r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#">"#,
                r#"<head><variable name="x"/><variable name="y"/></head><results>"#,
                r#"<result><binding name="x"><uri>http://example.org/a&amp;b</uri></binding>"#,
                r#"<binding name="y"><literal xml:lang="en">&lt;hi&gt;</literal></binding></result>"#,
                r#"<result><binding name="x"><literal datatype="http://www.w3.org/2001/XMLSchema#integer">7</literal></binding></result>"#,
                r#"</results></sparql>"#
            )
        );
    }

    #[test]
    fn test_empty_and_ask_documents() {
        let empty = XmlSerializer
            .render(&QueryResult::select(vec![Variable::new("x")], vec![]))
            .unwrap();
        assert_eq!(
            empty,
            r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#"><head><variable name="x"/></head><results></results></sparql>"#
        );

        let ask = XmlSerializer.render(&QueryResult::ask(false)).unwrap();
        assert_eq!(
            ask,
            r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#"><head/><boolean>false</boolean></sparql>"#
        );
    }
}
