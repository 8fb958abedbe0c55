use crate::classify::{ClassifiedRecord, Severity};
use crate::config::ChannelConfig;
use crate::render::red;

use super::identity::ProcessIdentity;

/// Which rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Verbose/debug lines are never shown
    Chatter,
    /// Error from the runtime crash channel
    RuntimeError,
    /// Output of the operator's own app
    OwnOutput,
    /// Own output while a test run is buffering
    TestRunInProgress,
    /// Own output from a pid other than the current identity
    StalePid,
    /// No rule admits the line
    Unlisted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecision {
    pub allow: bool,
    pub message: String,
    pub rule: FilterRule,
}

/// Allow/deny rules, evaluated in order
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    own_output: String,
    runtime_errors: String,
}

impl FilterPolicy {
    pub fn new(channels: &ChannelConfig) -> Self {
        Self {
            own_output: channels.own_output.clone(),
            runtime_errors: channels.runtime_errors.clone(),
        }
    }

    pub fn own_output(&self) -> &str {
        &self.own_output
    }

    pub fn decide(
        &self,
        record: &ClassifiedRecord,
        identity: &ProcessIdentity,
        test_run_active: bool,
    ) -> FilterDecision {
        let rule = self.rule_for(record, identity, test_run_active);
        let allow = matches!(rule, FilterRule::RuntimeError | FilterRule::OwnOutput);

        let message = if allow && record.severity == Severity::Error {
            red(&record.message)
        } else {
            record.message.clone()
        };

        tracing::trace!(
            severity = %record.severity,
            owner = %record.owner,
            pid = %record.pid,
            ?rule,
            allow,
            "Filter verdict"
        );

        FilterDecision {
            allow,
            message,
            rule,
        }
    }

    fn rule_for(
        &self,
        record: &ClassifiedRecord,
        identity: &ProcessIdentity,
        test_run_active: bool,
    ) -> FilterRule {
        if record.severity.is_chatter() {
            return FilterRule::Chatter;
        }
        if record.severity == Severity::Error && record.is_from(&self.runtime_errors) {
            return FilterRule::RuntimeError;
        }
        if record.is_from(&self.own_output) {
            if test_run_active {
                return FilterRule::TestRunInProgress;
            }
            if identity.is_stale(&record.pid) {
                return FilterRule::StalePid;
            }
            return FilterRule::OwnOutput;
        }
        FilterRule::Unlisted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::parse_record;

    fn policy() -> FilterPolicy {
        FilterPolicy::new(&ChannelConfig::default())
    }

    fn anchored(pid: &str) -> ProcessIdentity {
        let mut identity = ProcessIdentity::new();
        let start = parse_record(&format!("I/System.out({pid}): !!START!!")).unwrap();
        identity.observe(&start, "System.out");
        identity
    }

    fn decide(line: &str, identity: &ProcessIdentity, active: bool) -> FilterDecision {
        policy().decide(&parse_record(line).unwrap(), identity, active)
    }

    #[test]
    fn test_chatter_denied_even_from_allowed_channels() {
        let none = ProcessIdentity::new();
        for line in [
            "V/System.out(1): x",
            "D/System.out(1): x",
            "V/AndroidRuntime(1): x",
            "D/AndroidRuntime(1): x",
        ] {
            let d = decide(line, &none, false);
            assert!(!d.allow, "{line}");
            assert_eq!(d.rule, FilterRule::Chatter);
        }
    }

    #[test]
    fn test_runtime_errors_allowed_and_red() {
        let d = decide("E/AndroidRuntime(123): boom", &anchored("5"), true);
        assert!(d.allow);
        assert_eq!(d.rule, FilterRule::RuntimeError);
        assert_eq!(d.message, "\x1b[31mboom\x1b[0m");
    }

    #[test]
    fn test_runtime_non_errors_denied() {
        let none = ProcessIdentity::new();
        for line in [
            "I/AndroidRuntime(1): x",
            "W/AndroidRuntime(1): x",
            "F/AndroidRuntime(1): x",
        ] {
            let d = decide(line, &none, false);
            assert!(!d.allow, "{line}");
            assert_eq!(d.rule, FilterRule::Unlisted);
        }
    }

    #[test]
    fn test_own_output_truth_table() {
        let none = ProcessIdentity::new();
        let five = anchored("5");

        // (identity, pid, run active) -> expected rule
        let cases = [
            (&none, "5", false, FilterRule::OwnOutput),
            (&none, "9", false, FilterRule::OwnOutput),
            (&five, "5", false, FilterRule::OwnOutput),
            (&five, "9", false, FilterRule::StalePid),
            (&none, "5", true, FilterRule::TestRunInProgress),
            (&five, "5", true, FilterRule::TestRunInProgress),
            (&five, "9", true, FilterRule::TestRunInProgress),
        ];

        for (identity, pid, active, expected) in cases {
            for severity in ["I", "W", "E", "F", "A"] {
                let line = format!("{severity}/System.out({pid}): msg");
                let d = decide(&line, identity, active);
                assert_eq!(d.rule, expected, "{line} active={active}");
                assert_eq!(d.allow, expected == FilterRule::OwnOutput, "{line}");
            }
        }
    }

    #[test]
    fn test_own_output_errors_are_red_only_when_allowed() {
        let d = decide("E/System.out(5): bad", &anchored("5"), false);
        assert_eq!(d.message, "\x1b[31mbad\x1b[0m");

        let d = decide("E/System.out(9): bad", &anchored("5"), false);
        assert!(!d.allow);
        assert_eq!(d.message, "bad");

        let d = decide("W/System.out(5): careful", &anchored("5"), false);
        assert_eq!(d.message, "careful");
    }

    #[test]
    fn test_other_owners_denied() {
        let none = ProcessIdentity::new();
        for line in ["E/ActivityManager(1): x", "I/TestRunner(1): started:", "F/libc(1): x"] {
            let d = decide(line, &none, false);
            assert!(!d.allow, "{line}");
            assert_eq!(d.rule, FilterRule::Unlisted);
        }
    }

    #[test]
    fn test_custom_channels() {
        let channels = ChannelConfig {
            own_output: "MyApp".to_string(),
            runtime_errors: "Crash".to_string(),
            ..ChannelConfig::default()
        };
        let policy = FilterPolicy::new(&channels);
        let none = ProcessIdentity::new();

        let mine = parse_record("I/MyApp(1): hi").unwrap();
        assert!(policy.decide(&mine, &none, false).allow);
        let crash = parse_record("E/Crash(1): boom").unwrap();
        assert!(policy.decide(&crash, &none, false).allow);
        let sysout = parse_record("I/System.out(1): hi").unwrap();
        assert!(!policy.decide(&sysout, &none, false).allow);
    }
}
