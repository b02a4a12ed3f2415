#[allow(unused_macros)]
macro_rules! enable_logging {
    ($level:ident) => {{
        use ::tracing::level_filters::LevelFilter;
        use ::tracing_subscriber::{
            layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::$level.into())
            .from_env_lossy();

        let _ = ::tracing_subscriber::registry()
            .with(
                ::tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init();
    }};
}

#[allow(unused_imports)]
pub(crate) use enable_logging;

#[allow(unused_macros)]
macro_rules! assert_advanced {
    ($report:expr, $season:expr, $week:expr, $played:expr) => {{
        match $report.outcome($season) {
            Some(Ok(::hbfl_sim::Progress::Advanced { week, played })) => {
                assert_eq!(*week, $week, "week of season {}", $season);
                assert_eq!(*played, $played, "games played in season {}", $season);
            }
            other => panic!("season {} did not advance: {other:?}", $season),
        }
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_advanced;
