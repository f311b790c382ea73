//! The console's route table.

use serde::Serialize;

/// Views a route can render. Several routes may share one view
/// (add and edit forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ViewId {
    Dashboard,
    PatientList,
    PatientForm,
    DoctorList,
    DoctorForm,
    DepartmentList,
    DepartmentForm,
    WardList,
    WardForm,
    VisitList,
    VisitForm,
    VisitDetail,
    AdmissionList,
    AdmissionAdd,
    DepartmentStats,
    RevenueStats,
    DoctorWorkload,
    Login,
    NotFound,
}

impl ViewId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::PatientList => "PatientList",
            Self::PatientForm => "PatientForm",
            Self::DoctorList => "DoctorList",
            Self::DoctorForm => "DoctorForm",
            Self::DepartmentList => "DepartmentList",
            Self::DepartmentForm => "DepartmentForm",
            Self::WardList => "WardList",
            Self::WardForm => "WardForm",
            Self::VisitList => "VisitList",
            Self::VisitForm => "VisitForm",
            Self::VisitDetail => "VisitDetail",
            Self::AdmissionList => "AdmissionList",
            Self::AdmissionAdd => "AdmissionAdd",
            Self::DepartmentStats => "DepartmentStats",
            Self::RevenueStats => "RevenueStats",
            Self::DoctorWorkload => "DoctorWorkload",
            Self::Login => "Login",
            Self::NotFound => "NotFound",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chrome wrapped around a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layout {
    /// Sidebar and header shell shared by every page except login and 404.
    Main,
}

/// One entry of the table. Nested routes are stored flattened with their
/// full path; `layout` records the parent they were declared under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: Option<ViewId>,
    pub title: Option<&'static str>,
    pub redirect: Option<&'static str>,
    pub layout: Option<Layout>,
}

impl RouteRecord {
    pub const fn page(
        path: &'static str,
        name: &'static str,
        view: ViewId,
        title: &'static str,
    ) -> Self {
        Self {
            path,
            name: Some(name),
            view: Some(view),
            title: Some(title),
            redirect: None,
            layout: Some(Layout::Main),
        }
    }

    pub const fn standalone(
        path: &'static str,
        name: &'static str,
        view: ViewId,
        title: &'static str,
    ) -> Self {
        Self {
            layout: None,
            ..Self::page(path, name, view, title)
        }
    }

    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            view: None,
            title: None,
            redirect: Some(to),
            layout: Some(Layout::Main),
        }
    }
}

pub fn console_routes() -> Vec<RouteRecord> {
    use ViewId::*;
    vec![
        RouteRecord::redirect("/", "/dashboard"),
        RouteRecord::page("/dashboard", "Dashboard", Dashboard, "首页"),
        RouteRecord::page("/patients", "Patients", PatientList, "患者管理"),
        RouteRecord::page("/patients/add", "AddPatient", PatientForm, "新增患者"),
        RouteRecord::page("/patients/edit/:id", "EditPatient", PatientForm, "编辑患者"),
        RouteRecord::page("/doctors", "Doctors", DoctorList, "医师管理"),
        RouteRecord::page("/doctors/add", "AddDoctor", DoctorForm, "新增医师"),
        RouteRecord::page("/doctors/edit/:id", "EditDoctor", DoctorForm, "编辑医师"),
        RouteRecord::page("/departments", "Departments", DepartmentList, "科室管理"),
        RouteRecord::page(
            "/departments/add",
            "AddDepartment",
            DepartmentForm,
            "新增科室",
        ),
        RouteRecord::page(
            "/departments/edit/:id",
            "EditDepartment",
            DepartmentForm,
            "编辑科室",
        ),
        RouteRecord::page("/wards", "Wards", WardList, "病房管理"),
        RouteRecord::page("/wards/add", "AddWard", WardForm, "新增病房"),
        RouteRecord::page("/wards/edit/:id", "EditWard", WardForm, "编辑病房"),
        RouteRecord::page("/visits", "Visits", VisitList, "就诊记录"),
        RouteRecord::page("/visits/add", "AddVisit", VisitForm, "新增就诊记录"),
        RouteRecord::page(
            "/visits/details/:id",
            "VisitDetail",
            VisitDetail,
            "就诊记录详情",
        ),
        RouteRecord::page("/admissions", "Admissions", AdmissionList, "在院患者"),
        RouteRecord::page("/admissions/add", "AddAdmission", AdmissionAdd, "办理入院"),
        RouteRecord::page(
            "/statistics/department",
            "DepartmentStats",
            DepartmentStats,
            "科室统计",
        ),
        RouteRecord::page(
            "/statistics/revenue",
            "RevenueStats",
            RevenueStats,
            "流水统计",
        ),
        RouteRecord::page(
            "/statistics/doctor",
            "DoctorWorkload",
            DoctorWorkload,
            "医师工作量",
        ),
        RouteRecord::standalone("/login", "Login", Login, "登录"),
        RouteRecord::standalone("/:pathMatch(.*)*", "NotFound", NotFound, "页面未找到"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let routes = console_routes();
        let names: HashSet<_> = routes.iter().filter_map(|r| r.name).collect();
        assert_eq!(names.len(), routes.iter().filter(|r| r.name.is_some()).count());
    }

    #[test]
    fn catch_all_is_declared_last() {
        let routes = console_routes();
        assert_eq!(routes.last().and_then(|r| r.view), Some(ViewId::NotFound));
    }

    #[test]
    fn only_login_and_not_found_skip_the_layout() {
        let standalone: Vec<_> = console_routes()
            .into_iter()
            .filter(|r| r.layout.is_none())
            .filter_map(|r| r.name)
            .collect();
        assert_eq!(standalone, vec!["Login", "NotFound"]);
    }
}
