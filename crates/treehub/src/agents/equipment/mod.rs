//! Equipment intelligence: listing quality scores and maintenance alerts.

pub mod domain;
mod scoring;

pub use domain::{
    EquipmentComponent, EquipmentCondition, EquipmentFactor, EquipmentKind, EquipmentListing,
    EquipmentScore, MaintenanceAlert,
};
pub use scoring::{recommend_for_job, required_equipment, score_listing, EquipmentConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentId, ServiceCategory};
    use crate::geo::Coordinates;

    fn yard() -> Coordinates {
        Coordinates::new(44.9778, -93.2650).expect("valid")
    }

    fn listing(id: &str, kind: EquipmentKind) -> EquipmentListing {
        EquipmentListing {
            id: EquipmentId::new(id),
            kind,
            condition: EquipmentCondition::Good,
            year: 2020,
            engine_hours: 1_800,
            hours_since_service: 40,
            asking_price_cents: 3_600_000,
            market_price_cents: 4_000_000,
            location: yard(),
        }
    }

    fn component(score: &EquipmentScore, factor: EquipmentFactor) -> f64 {
        score
            .components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.score)
            .expect("factor recorded")
    }

    #[test]
    fn scores_blend_condition_age_value_and_distance() {
        let scored = score_listing(
            &listing("eq-1", EquipmentKind::Chipper),
            yard(),
            2025,
            &EquipmentConfig::default(),
        );

        assert_eq!(component(&scored, EquipmentFactor::Condition), 70.0);
        assert!((component(&scored, EquipmentFactor::Age) - 75.0).abs() < 1e-9);
        assert!((component(&scored, EquipmentFactor::Value) - 85.0).abs() < 1e-9);
        assert_eq!(component(&scored, EquipmentFactor::Distance), 100.0);
        // 0.35*70 + 0.2*75 + 0.3*85 + 0.15*100
        assert!((scored.total - 80.0).abs() < 0.01, "{}", scored.total);
        assert!(scored.alerts.is_empty());
    }

    #[test]
    fn overpriced_listings_lose_value_score() {
        let mut pricey = listing("eq-2", EquipmentKind::Crane);
        pricey.asking_price_cents = 6_000_000;
        let scored = score_listing(&pricey, yard(), 2025, &EquipmentConfig::default());
        assert_eq!(component(&scored, EquipmentFactor::Value), 0.0);

        pricey.asking_price_cents = 5_000_000;
        let scored = score_listing(&pricey, yard(), 2025, &EquipmentConfig::default());
        assert!((component(&scored, EquipmentFactor::Value) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn maintenance_alerts_flag_service_and_age() {
        let config = EquipmentConfig::default();

        let mut due = listing("eq-3", EquipmentKind::StumpGrinder);
        due.hours_since_service = 210;
        let scored = score_listing(&due, yard(), 2025, &config);
        assert_eq!(
            scored.alerts,
            vec![MaintenanceAlert::ServiceDueSoon { hours_remaining: 40 }]
        );

        let mut overdue = listing("eq-4", EquipmentKind::StumpGrinder);
        overdue.hours_since_service = 300;
        overdue.year = 1999;
        overdue.market_price_cents = 0;
        let scored = score_listing(&overdue, yard(), 2025, &config);
        assert_eq!(
            scored.alerts,
            vec![
                MaintenanceAlert::ServiceOverdue {
                    hours_since_service: 300,
                    interval: 250
                },
                MaintenanceAlert::AgingUnit { age_years: 26 },
                MaintenanceAlert::UnknownMarketPrice,
            ]
        );
        assert_eq!(component(&scored, EquipmentFactor::Value), 0.0);
        assert_eq!(component(&scored, EquipmentFactor::Age), 0.0);
    }

    #[test]
    fn recommendations_only_include_required_kinds() {
        let mut worn = listing("eq-worn", EquipmentKind::Chipper);
        worn.condition = EquipmentCondition::Poor;
        let listings = vec![
            worn,
            listing("eq-grinder", EquipmentKind::StumpGrinder),
            listing("eq-bucket", EquipmentKind::BucketTruck),
        ];

        let picks = recommend_for_job(
            ServiceCategory::TreeRemoval,
            &listings,
            yard(),
            2025,
            &EquipmentConfig::default(),
        );
        let ids: Vec<&str> = picks.iter().map(|score| score.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["eq-bucket", "eq-worn"]);

        assert!(recommend_for_job(
            ServiceCategory::Consultation,
            &listings,
            yard(),
            2025,
            &EquipmentConfig::default(),
        )
        .is_empty());
    }
}
