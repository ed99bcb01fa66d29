use super::domain::{AlertPriority, CrewAlert, StormEvent, StormSeverity};
use crate::agents::job_matching::ContractorProfile;

/// Alert every contractor whose service area overlaps the storm footprint.
pub fn crew_alerts(storm: &StormEvent, contractors: &[ContractorProfile]) -> Vec<CrewAlert> {
    let level = f64::from(storm.severity.level());
    let storm_radius = storm.radius_miles.max(0.0);

    let mut alerts: Vec<CrewAlert> = contractors
        .iter()
        .filter_map(|contractor| {
            let distance = storm.center.distance_miles(&contractor.base_location);
            let reach = storm_radius + contractor.service_radius_miles.max(0.0);
            if distance > reach {
                return None;
            }

            let inside_footprint = distance <= storm_radius;
            let priority = if inside_footprint && storm.severity >= StormSeverity::Severe {
                AlertPriority::Critical
            } else if inside_footprint {
                AlertPriority::High
            } else {
                AlertPriority::Standard
            };

            let proximity = if reach > 0.0 {
                1.0 - distance / reach
            } else {
                1.0
            };
            let suggested_crews = (level * proximity).ceil().max(1.0) as u32;

            Some(CrewAlert {
                contractor_id: contractor.id.clone(),
                storm_id: storm.id.clone(),
                priority,
                distance_miles: distance,
                suggested_crews,
                message: format!(
                    "{} storm '{}' {:.1} mi from your base; stage {} crew(s)",
                    storm.severity.label(),
                    storm.name,
                    distance,
                    suggested_crews
                ),
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.distance_miles.total_cmp(&b.distance_miles))
            .then_with(|| a.contractor_id.cmp(&b.contractor_id))
    });
    alerts
}
