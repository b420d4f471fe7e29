use crate::registry::ReportRegistry;
use relief_core::{
    minutes_before, DisasterReport, EpochMillis, ReportId, ReportStatus, Urgency,
};

struct DemoReport {
    id: u64,
    name: &'static str,
    phone: &'static str,
    address: &'static str,
    urgency: Urgency,
    disaster_type: &'static str,
    description: &'static str,
    people_count: &'static str,
    minutes_ago: u64,
    status: ReportStatus,
}

const DEMO_REPORTS: [DemoReport; 3] = [
    DemoReport {
        id: 1,
        name: "王小明",
        phone: "0912345678",
        address: "新北市汐止區大同路123號",
        urgency: Urgency::Critical,
        disaster_type: "淹水",
        description: "一樓完全淹水，二樓有老人無法下樓",
        people_count: "2",
        minutes_ago: 10,
        status: ReportStatus::Pending,
    },
    DemoReport {
        id: 2,
        name: "李美華",
        phone: "0923456789",
        address: "新北市汐止區中正路456號",
        urgency: Urgency::High,
        disaster_type: "停電",
        description: "整個社區停電，有嬰兒需要保溫",
        people_count: "1",
        minutes_ago: 25,
        status: ReportStatus::InProgress,
    },
    DemoReport {
        id: 3,
        name: "張大偉",
        phone: "0934567890",
        address: "新北市汐止區民生路789號",
        urgency: Urgency::Medium,
        disaster_type: "土石流",
        description: "後院土石流，需要協助清理通道",
        people_count: "",
        minutes_ago: 45,
        status: ReportStatus::Pending,
    },
];

impl ReportRegistry {
    /// Loads the demonstration reports, timestamped relative to `now`.
    /// Only an empty registry is seeded; returns whether anything was added.
    pub fn seed_demo(&mut self, now: EpochMillis) -> bool {
        if !self.is_empty() {
            tracing::warn!(reports = self.len(), "registry not empty, skipping demo seed");
            return false;
        }
        for demo in &DEMO_REPORTS {
            self.insert_existing(DisasterReport {
                id: ReportId::from_sequence(demo.id),
                name: demo.name.to_string(),
                phone: demo.phone.to_string(),
                address: demo.address.to_string(),
                urgency: demo.urgency,
                disaster_type: demo.disaster_type.to_string(),
                description: demo.description.to_string(),
                people_count: demo.people_count.to_string(),
                timestamp: minutes_before(now, demo.minutes_ago),
                status: demo.status,
                estimated_wait_time: demo.urgency.estimated_wait_time().to_string(),
            });
        }
        tracing::info!(reports = DEMO_REPORTS.len(), "seeded demo reports");
        true
    }
}
