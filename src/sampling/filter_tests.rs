//! Tests for the exclusion filters.

use std::net::Ipv4Addr;

use super::filter::*;

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

mod matchers {
    use super::*;

    #[test]
    fn private_matches_rfc1918_ranges() {
        assert!(PrivateFilter.matches(ip("10.1.2.3")));
        assert!(PrivateFilter.matches(ip("172.16.0.1")));
        assert!(PrivateFilter.matches(ip("172.31.255.254")));
        assert!(PrivateFilter.matches(ip("192.168.1.1")));
        assert!(!PrivateFilter.matches(ip("172.32.0.1")));
        assert!(!PrivateFilter.matches(ip("8.8.8.8")));
    }

    #[test]
    fn loopback_matches_127_block() {
        assert!(LoopbackFilter.matches(ip("127.0.0.1")));
        assert!(LoopbackFilter.matches(ip("127.200.1.9")));
        assert!(!LoopbackFilter.matches(ip("128.0.0.1")));
    }

    #[test]
    fn link_local_matches_169_254() {
        assert!(LinkLocalFilter.matches(ip("169.254.10.10")));
        assert!(!LinkLocalFilter.matches(ip("169.253.10.10")));
    }

    #[test]
    fn first_octet_threshold_is_inclusive() {
        let filter = FirstOctetAtLeast::MULTICAST_AND_RESERVED;
        assert!(filter.matches(ip("224.0.0.1")));
        assert!(filter.matches(ip("254.1.1.1")));
        assert!(!filter.matches(ip("223.255.255.254")));
    }
}

mod chain {
    use super::*;

    #[test]
    fn empty_chain_accepts_everything() {
        let chain = ExclusionChain::new();
        assert!(chain.is_empty());
        assert!(chain.accepts(ip("10.0.0.1")));
        assert!(chain.accepts(ip("255.255.255.255")));
    }

    #[test]
    fn public_unicast_has_four_rules() {
        assert_eq!(ExclusionChain::public_unicast().len(), 4);
    }

    #[test]
    fn public_unicast_rejects_non_public_ranges() {
        let chain = ExclusionChain::public_unicast();
        for addr in [
            "10.0.0.1",
            "172.20.1.1",
            "192.168.0.10",
            "127.0.0.1",
            "169.254.1.1",
            "224.0.0.5",
            "240.1.2.3",
        ] {
            assert!(!chain.accepts(ip(addr)), "{addr} should be excluded");
        }
    }

    #[test]
    fn public_unicast_accepts_public_addresses() {
        let chain = ExclusionChain::public_unicast();
        for addr in ["1.1.1.1", "8.8.8.8", "81.2.69.160", "223.255.255.254"] {
            assert!(chain.accepts(ip(addr)), "{addr} should be accepted");
        }
    }

    #[test]
    fn debug_shows_rule_count() {
        let debug = format!("{:?}", ExclusionChain::public_unicast());
        assert!(debug.contains("exclude_count: 4"));
    }
}
