//! RDF namespace envelope applied at render time.
//!
//! Upstream fragments arrive without an enclosing root element. The store
//! keeps them that way; every successful response wraps the fragment in a
//! fixed `rdf:RDF` root carrying the namespace declarations the fragments
//! reference. Because wrapping happens on every request, a change to the
//! namespace list takes effect for already-cached entries immediately.

/// Closed list of namespace prefixes the upstream vocabularies use.
///
/// Order is fixed so that wrapped output is byte-stable across requests.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("bibo", "http://purl.org/ontology/bibo/"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("gndo", "http://d-nb.info/standards/elementset/gnd#"),
    ("isbd", "http://iflastandards.info/ns/isbd/elements/"),
    ("lib", "http://purl.org/library/"),
    ("marcRole", "http://id.loc.gov/vocabulary/relators/"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rda", "http://rdvocab.info/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("umbel", "http://umbel.org/umbel#"),
];

/// Wrap a raw fragment in the `rdf:RDF` namespace envelope.
///
/// The fragment is embedded verbatim between the open and close tags.
pub fn wrap_fragment(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + 640);
    out.push_str("<rdf:RDF\n");
    for (prefix, uri) in NAMESPACES {
        out.push_str("xmlns:");
        out.push_str(prefix);
        out.push_str("=\"");
        out.push_str(uri);
        out.push_str("\"\n");
    }
    out.push('>');
    out.push_str(fragment);
    out.push_str("\n</rdf:RDF>");
    out
}
