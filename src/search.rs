//! Linear search over record sets
//!
//! Record sets are scanned in the order given, records in file order and
//! tuples in record order. A record is returned at most once, however many
//! of its tuples match.

use crate::record::RecordSet;

/// Collect every record containing a tuple with `attr` and, unless `val` is
/// empty, a value equal to `val`
///
/// An empty result means nothing matched; it is not an error.
pub fn search<'a>(
    sets: impl IntoIterator<Item = &'a RecordSet>,
    attr: &str,
    val: &str,
) -> RecordSet {
    sets.into_iter()
        .flat_map(RecordSet::iter)
        .filter(|record| record.matches(attr, val))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_records;

    const LOCAL: &str = "\
sys=helix ip=10.0.0.2 dom=helix.example
sys=ptolemy ip=10.0.0.3
\tether=0800690222f0
ipnet=lan ip=10.0.0.0 ipmask=255.255.255.0
";

    const SERVICES: &str = "\
tcp=echo port=7
udp=echo port=7
udp=syslog port=514
\tproto=udp
tcp=ssh port=22 ip=10.0.0.2
";

    fn sets() -> (RecordSet, RecordSet) {
        (
            parse_records(LOCAL.as_bytes()).unwrap(),
            parse_records(SERVICES.as_bytes()).unwrap(),
        )
    }

    #[test]
    fn test_exact_match() {
        let (local, services) = sets();
        let found = search([&local, &services], "udp", "syslog");
        assert_eq!(found.len(), 1);
        assert_eq!(found.value_of("port"), "514");
    }

    #[test]
    fn test_presence_match_with_empty_value() {
        let (local, services) = sets();
        let found = search([&local, &services], "tcp", "");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value_of("tcp"), "echo");
        assert_eq!(found[1].value_of("tcp"), "ssh");
    }

    #[test]
    fn test_order_is_file_then_record() {
        let (local, services) = sets();
        let found = search([&local, &services], "ip", "10.0.0.2");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value_of("sys"), "helix");
        assert_eq!(found[1].value_of("tcp"), "ssh");

        let found = search([&services, &local], "ip", "10.0.0.2");
        assert_eq!(found[0].value_of("tcp"), "ssh");
    }

    #[test]
    fn test_record_returned_once() {
        let set = parse_records(b"sys=multi alias=a alias=b alias=c\n").unwrap();
        assert_eq!(search([&set], "alias", "").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let (local, services) = sets();
        assert!(search([&local, &services], "udp", "nonesuch").is_empty());
        assert!(search([&local, &services], "nonesuch", "").is_empty());
        assert!(search(std::iter::empty::<&RecordSet>(), "sys", "").is_empty());
    }

    #[test]
    fn test_value_match_is_case_sensitive() {
        let (local, _) = sets();
        assert!(search([&local], "sys", "HELIX").is_empty());
    }
}
