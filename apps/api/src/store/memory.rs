//! In-memory store implementations for tests. They mirror the document
//! semantics of the Postgres adapters: whole-document replacement, no
//! version check, last write wins.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::requirement::JobRequirementRow;
use crate::models::roadmap::Roadmap;
use crate::models::user::{Role, User};
use crate::store::{CandidateStore, JobRequirementStore, RoadmapStore};

#[derive(Default)]
pub struct MemoryCandidateStore {
    users: Mutex<HashMap<Uuid, User>>,
    analyses: Mutex<HashMap<Uuid, Value>>,
}

impl MemoryCandidateStore {
    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.id, user);
        self
    }

    pub fn with_resume_analysis(self, candidate_id: Uuid, analysis: Value) -> Self {
        self.analyses.lock().unwrap().insert(candidate_id, analysis);
        self
    }

    /// Replaces a user wholesale, e.g. to clear a candidate's target list
    /// mid-test.
    pub fn upsert_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    pub fn roadmap_reference(&self, candidate_id: Uuid) -> Option<Uuid> {
        let users = self.users.lock().unwrap();
        match &users.get(&candidate_id)?.role {
            Role::Candidate(c) => c.roadmap_id,
            Role::Recruiter(_) => None,
        }
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn get_resume_analysis(&self, candidate_id: Uuid) -> Result<Option<Value>, AppError> {
        Ok(self.analyses.lock().unwrap().get(&candidate_id).cloned())
    }

    async fn set_roadmap_reference(
        &self,
        candidate_id: Uuid,
        roadmap_id: Uuid,
    ) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.get_mut(&candidate_id) {
            if let Role::Candidate(c) = &mut user.role {
                c.roadmap_id = Some(roadmap_id);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryJobRequirementStore {
    rows: Vec<JobRequirementRow>,
}

impl MemoryJobRequirementStore {
    pub fn with_row(mut self, row: JobRequirementRow) -> Self {
        self.rows.push(row);
        self
    }
}

#[async_trait]
impl JobRequirementStore for MemoryJobRequirementStore {
    async fn find_by_company_and_position(
        &self,
        company: &str,
        position: &str,
    ) -> Result<Vec<JobRequirementRow>, AppError> {
        let company = company.to_lowercase();
        let position = position.to_lowercase();
        Ok(self
            .rows
            .iter()
            .filter(|r| {
                r.company.to_lowercase().contains(&company)
                    && r.position.to_lowercase().contains(&position)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryRoadmapStore {
    docs: Mutex<HashMap<Uuid, Roadmap>>,
}

impl MemoryRoadmapStore {
    pub fn count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl RoadmapStore for MemoryRoadmapStore {
    async fn insert(&self, roadmap: &Roadmap) -> Result<(), AppError> {
        self.docs
            .lock()
            .unwrap()
            .insert(roadmap.id, roadmap.clone());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Roadmap>, AppError> {
        Ok(self.docs.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Roadmap>, AppError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .values()
            .find(|r| r.candidate_id == candidate_id)
            .cloned())
    }

    async fn replace(&self, roadmap: &Roadmap) -> Result<(), AppError> {
        // Blind overwrite, same as the Postgres UPDATE: no version counter,
        // concurrent replacers race and the last one wins.
        self.docs
            .lock()
            .unwrap()
            .insert(roadmap.id, roadmap.clone());
        Ok(())
    }

    async fn delete_by_candidate(&self, candidate_id: Uuid) -> Result<(), AppError> {
        self.docs
            .lock()
            .unwrap()
            .retain(|_, r| r.candidate_id != candidate_id);
        Ok(())
    }
}
