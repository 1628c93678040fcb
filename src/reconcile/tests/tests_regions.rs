use super::super::regions::template_parts;
use crate::reconcile::{AnnotationRegionLocator, RegionLanguage, RegionLocator};

/// (language, text) of every region located in `source`
fn regions(source: &str) -> Vec<(RegionLanguage, &str)> {
    AnnotationRegionLocator
        .locate(source)
        .into_iter()
        .map(|region| (region.language, region.text(source)))
        .collect()
}

#[test]
fn test_scheduled_cron() {
    let source = r##"
        class Jobs {
            @Scheduled(cron = "0 0 * * * *", zone = "UTC")
            void hourly() {}
        }
    "##;
    assert_eq!(regions(source), vec![(RegionLanguage::Cron, "0 0 * * * *")]);
}

#[test]
fn test_region_offset_points_at_content() {
    let source = r##"@Scheduled(cron = "0 0 * * * *")"##;
    let located = AnnotationRegionLocator.locate(source);
    assert_eq!(located.len(), 1);
    assert_eq!(u32::from(located[0].offset()), 19);
}

#[test]
fn test_qualified_annotation_name() {
    let source =
        r##"@org.springframework.scheduling.annotation.Scheduled(cron = "@daily") void f() {}"##;
    assert_eq!(regions(source), vec![(RegionLanguage::Cron, "@daily")]);
}

#[test]
fn test_externalized_cron_is_a_placeholder() {
    let source = r##"@Scheduled(cron = "${jobs.cleanup.cron}")"##;
    assert_eq!(
        regions(source),
        vec![(RegionLanguage::Placeholder, "jobs.cleanup.cron")]
    );
}

#[test]
fn test_value_templates() {
    let source = r##"
        @Value("${server.port:8080}") int port;
        @Value("#{systemProperties['user.region'] ?: 'EU'}") String region;
        @Value("prefix-${app.name}-#{1 + 2}") String mixed;
    "##;
    assert_eq!(
        regions(source),
        vec![
            (RegionLanguage::Placeholder, "server.port:8080"),
            (RegionLanguage::Spel, "systemProperties['user.region'] ?: 'EU'"),
            (RegionLanguage::Placeholder, "app.name"),
            (RegionLanguage::Spel, "1 + 2"),
        ]
    );
}

#[test]
fn test_queries() {
    let source = r##"
        interface Employees {
            @Query("SELECT e FROM Employee e WHERE e.active = true")
            List<Employee> active();

            @Query(value = "select * from employee", nativeQuery = true)
            List<Employee> native();

            @Query(value = "SELECT e FROM Employee e", countQuery = "SELECT count(e) FROM Employee e")
            Page<Employee> page(Pageable pageable);
        }
    "##;
    assert_eq!(
        regions(source),
        vec![
            (RegionLanguage::Jpql, "SELECT e FROM Employee e WHERE e.active = true"),
            (RegionLanguage::Jpql, "SELECT e FROM Employee e"),
            (RegionLanguage::Jpql, "SELECT count(e) FROM Employee e"),
        ]
    );
}

#[test]
fn test_security_and_cache_expressions() {
    let source = r##"
        @PreAuthorize("hasRole('ADMIN')")
        @Cacheable(cacheNames = "users", key = "#id", unless = "#result == null")
        @EventListener(condition = "#event.success")
        User load(long id) { return null; }
    "##;
    assert_eq!(
        regions(source),
        vec![
            (RegionLanguage::Spel, "hasRole('ADMIN')"),
            (RegionLanguage::Spel, "#id"),
            (RegionLanguage::Spel, "#result == null"),
            (RegionLanguage::Spel, "#event.success"),
        ]
    );
}

#[test]
fn test_skipped_values() {
    let source = r##"
        // @Scheduled(cron = "in a comment")
        /* @Query("in a block comment") */
        @Query("SELECT \"quoted\" FROM T")
        @Query("SELECT e " + "FROM Employee e")
        @Scheduled(cron = CRON)
        @Transactional(readOnly = true)
        String s = "@Scheduled(cron = \"in a string\")";
    "##;
    assert!(regions(source).is_empty());
}

#[test]
fn test_unterminated_annotation() {
    let source = r##"@Scheduled(cron = "0 0 * * * *""##;
    assert!(regions(source).is_empty());
}

#[test]
fn test_template_parts() {
    assert_eq!(
        template_parts("a ${b} #{c {d}} ${"),
        vec![(RegionLanguage::Placeholder, 4..5), (RegionLanguage::Spel, 9..14)]
    );
    assert!(template_parts("no templates here").is_empty());
}
