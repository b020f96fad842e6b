use chrono::{DateTime, Utc};
use petcare_core::{AppResult, RecordId};
use petcare_domain::{
    Clinic, ClinicDraft, ClinicFilter, NewClinic, NewPet, NewPlan, NewSubscription, NewUser,
    Permission, Pet, PetDraft, PetFilter, Plan, PlanDraft, PlanFilter, RecordTimestamps,
    Subscription, SubscriptionDraft, SubscriptionFilter, User, UserDraft, UserFilter,
};

use crate::EntityKind;

impl EntityKind for Clinic {
    const DISPLAY_NAME: &'static str = "Clinic";
    const READ_PERMISSION: Permission = Permission::ClinicRead;
    const MANAGE_PERMISSION: Permission = Permission::ClinicManage;

    type Input = NewClinic;
    type Draft = ClinicDraft;
    type Filter = ClinicFilter;

    fn validate(input: Self::Input, _now: DateTime<Utc>) -> AppResult<Self::Draft> {
        ClinicDraft::new(input)
    }

    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self {
        draft.into_record(id, timestamps)
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn timestamps(&self) -> RecordTimestamps {
        self.timestamps
    }

    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool {
        Clinic::matches(self, filter, search)
    }
}

impl EntityKind for Pet {
    const DISPLAY_NAME: &'static str = "Pet";
    const READ_PERMISSION: Permission = Permission::PetRead;
    const MANAGE_PERMISSION: Permission = Permission::PetManage;

    type Input = NewPet;
    type Draft = PetDraft;
    type Filter = PetFilter;

    fn validate(input: Self::Input, now: DateTime<Utc>) -> AppResult<Self::Draft> {
        PetDraft::new(input, now.date_naive())
    }

    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self {
        draft.into_record(id, timestamps)
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn timestamps(&self) -> RecordTimestamps {
        self.timestamps
    }

    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool {
        Pet::matches(self, filter, search)
    }

    fn restrict_to_owner(filter: &mut Self::Filter, owner_id: &RecordId) -> bool {
        filter.owner_id = Some(owner_id.clone());
        true
    }

    fn is_owned_by(&self, owner_id: &RecordId) -> bool {
        &self.owner_id == owner_id
    }
}

impl EntityKind for Plan {
    const DISPLAY_NAME: &'static str = "Plan";
    const READ_PERMISSION: Permission = Permission::PlanRead;
    const MANAGE_PERMISSION: Permission = Permission::PlanManage;

    type Input = NewPlan;
    type Draft = PlanDraft;
    type Filter = PlanFilter;

    fn validate(input: Self::Input, _now: DateTime<Utc>) -> AppResult<Self::Draft> {
        PlanDraft::new(input)
    }

    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self {
        draft.into_record(id, timestamps)
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn timestamps(&self) -> RecordTimestamps {
        self.timestamps
    }

    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool {
        Plan::matches(self, filter, search)
    }
}

impl EntityKind for Subscription {
    const DISPLAY_NAME: &'static str = "Subscription";
    const READ_PERMISSION: Permission = Permission::SubscriptionRead;
    const MANAGE_PERMISSION: Permission = Permission::SubscriptionManage;

    type Input = NewSubscription;
    type Draft = SubscriptionDraft;
    type Filter = SubscriptionFilter;

    fn validate(input: Self::Input, _now: DateTime<Utc>) -> AppResult<Self::Draft> {
        SubscriptionDraft::new(input)
    }

    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self {
        draft.into_record(id, timestamps)
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn timestamps(&self) -> RecordTimestamps {
        self.timestamps
    }

    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool {
        Subscription::matches(self, filter, search)
    }
}

impl EntityKind for User {
    const DISPLAY_NAME: &'static str = "User";
    const READ_PERMISSION: Permission = Permission::UserRead;
    const MANAGE_PERMISSION: Permission = Permission::UserManage;

    type Input = NewUser;
    type Draft = UserDraft;
    type Filter = UserFilter;

    fn validate(input: Self::Input, _now: DateTime<Utc>) -> AppResult<Self::Draft> {
        UserDraft::new(input)
    }

    fn build(id: RecordId, timestamps: RecordTimestamps, draft: Self::Draft) -> Self {
        draft.into_record(id, timestamps)
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn timestamps(&self) -> RecordTimestamps {
        self.timestamps
    }

    fn matches(&self, filter: &Self::Filter, search: Option<&str>) -> bool {
        User::matches(self, filter, search)
    }
}
