#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            actual => panic!("expected `Ok`; actual={:?}", actual),
        }
    };
}

#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(e) => e,
            actual => panic!("expected `Err`; actual={:?}", actual),
        }
    };
}

/// Unwraps an accepted [`quire::Outcome`] into the accepted record.
#[macro_export]
macro_rules! assert_accepted {
    ($e:expr) => {
        match $e {
            quire::Outcome::Accepted(record) => record,
            quire::Outcome::Rejected(errors) => {
                panic!("expected the record to be accepted; errors={:#?}", errors)
            }
        }
    };
}

/// Unwraps a rejected [`quire::Outcome`] into its field errors.
#[macro_export]
macro_rules! assert_rejected {
    ($e:expr) => {
        match $e {
            quire::Outcome::Rejected(errors) => errors,
            quire::Outcome::Accepted(record) => {
                panic!("expected the record to be rejected; accepted={:#}", record)
            }
        }
    };
}
