//! Endpoint wrappers for the hospital backend.
//!
//! Every wrapper is a pure function returning an [`ApiRequest`]; the
//! `*Api` handles obtained from a [`Gateway`] send them. Identifiers are
//! interpolated into the path as given and payloads are forwarded as-is.

pub mod admission;
pub mod department;
pub mod doctor;
pub mod patient;
pub mod query;
pub mod records;
pub mod report;
pub mod visit;
pub mod ward;

pub use admission::AdmissionsApi;
pub use query::Page;
pub use records::{Collection, RecordsApi};
pub use report::ReportsApi;
pub use visit::VisitsApi;

use crate::gateway::Gateway;

impl Gateway {
    pub fn patients(&self) -> RecordsApi<'_> {
        RecordsApi::new(self, patient::COLLECTION)
    }

    pub fn doctors(&self) -> RecordsApi<'_> {
        RecordsApi::new(self, doctor::COLLECTION)
    }

    pub fn departments(&self) -> RecordsApi<'_> {
        RecordsApi::new(self, department::COLLECTION)
    }

    pub fn wards(&self) -> RecordsApi<'_> {
        RecordsApi::new(self, ward::COLLECTION)
    }

    pub fn visits(&self) -> VisitsApi<'_> {
        VisitsApi::new(self)
    }

    pub fn admissions(&self) -> AdmissionsApi<'_> {
        AdmissionsApi::new(self)
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiRequest;
    use reqwest::Method;
    use serde_json::{Value, json};

    fn assert_route(req: &ApiRequest, method: Method, path: &str, body: Option<&Value>) {
        assert_eq!(req.method, method, "method for {path}");
        assert_eq!(req.path, path);
        assert_eq!(req.body.as_ref(), body, "body for {path}");
    }

    #[test]
    fn patient_detail_is_get_without_body() {
        let req = patient::detail(42);
        assert_route(&req, Method::GET, "/patient/42", None);
        assert!(req.query.is_empty());
    }

    #[test]
    fn ward_update_is_put_with_body() {
        let data = json!({"WardName": "内科一病区", "Capacity": 30});
        let req = ward::update(7, &data).unwrap();
        assert_route(&req, Method::PUT, "/ward/7", Some(&data));
    }

    #[test]
    fn uniform_collections_share_shape() {
        let data = json!({"Name": "x"});
        for (base, c) in [
            ("/patient", patient::COLLECTION),
            ("/doctor", doctor::COLLECTION),
            ("/department", department::COLLECTION),
            ("/ward", ward::COLLECTION),
        ] {
            assert_route(&c.list(&()).unwrap(), Method::GET, base, None);
            assert_route(&c.detail(3), Method::GET, &format!("{base}/3"), None);
            assert_route(&c.add(&data).unwrap(), Method::POST, base, Some(&data));
            assert_route(
                &c.update(3, &data).unwrap(),
                Method::PUT,
                &format!("{base}/3"),
                Some(&data),
            );
            assert_route(&c.delete(3), Method::DELETE, &format!("{base}/3"), None);
        }
    }

    #[test]
    fn list_forwards_query_params() {
        let req = doctor::list(&query::DoctorQuery {
            page: Some(2),
            dept_id: Some(5),
            ..Default::default()
        })
        .unwrap();
        let mut q = req.query.clone();
        q.sort();
        assert_eq!(
            q,
            vec![
                ("deptId".to_string(), "5".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn visit_routes() {
        let rx = json!({"Prescription": "阿莫西林 0.5g tid"});
        assert_route(&visit::list(&()).unwrap(), Method::GET, "/visit", None);
        assert_route(&visit::detail(11), Method::GET, "/visit/11", None);
        assert_route(&visit::add(&rx).unwrap(), Method::POST, "/visit", Some(&rx));
        assert_route(
            &visit::update_prescription(11, &rx).unwrap(),
            Method::PUT,
            "/visit/11/prescription",
            Some(&rx),
        );
        assert_route(&visit::delete(11), Method::DELETE, "/visit/11", None);
    }

    #[test]
    fn admission_routes() {
        let data = json!({"DischargeDate": "2024-05-01"});
        let active = admission::list_active(&query::AdmissionQuery {
            ward_id: Some(1),
            ..Default::default()
        })
        .unwrap();
        assert_route(&active, Method::GET, "/admission/active", None);
        assert_eq!(active.query, vec![("wardId".to_string(), "1".to_string())]);

        assert_route(
            &admission::add(&data).unwrap(),
            Method::POST,
            "/admission",
            Some(&data),
        );

        let discharge = admission::discharge(8, &data).unwrap();
        assert_route(&discharge, Method::PUT, "/admission/8/discharge", Some(&data));
        assert_eq!(
            discharge.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn report_routes() {
        let window = query::StatsQuery::between("2024-01-01", "2024-01-31");
        let dept = report::department_stats(3, &window).unwrap();
        assert_route(&dept, Method::GET, "/department/3/stats", None);
        assert_eq!(dept.query.len(), 2);
        assert_route(
            &report::revenue(&window).unwrap(),
            Method::GET,
            "/report/revenue",
            None,
        );
        assert_route(
            &report::doctor_workload(9, &()).unwrap(),
            Method::GET,
            "/doctor/9/workload",
            None,
        );
    }

    #[test]
    fn identifiers_are_interpolated_verbatim() {
        assert_eq!(patient::detail("P-001").path, "/patient/P-001");
    }
}
