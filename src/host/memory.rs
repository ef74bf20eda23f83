//! In-memory host
//!
//! A budget simulator that only stores records, plus host services that
//! record what the plugin asked of them. The CLI replays commands against
//! it and the tests use it in place of a running game.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::{PhantomError, PhantomResult};
use crate::models::{
    BuildingType, CheatId, DepartmentId, DirectorId, HostList, ItemRef, LineItem,
    LocallyFundedItem, MessageId, NodeAllocator, NodeArena, NodeIndex, PurposeId,
};
use crate::plugin::{HostMessage, PhantomBudgetDirector};

use super::budget::{BudgetSimulator, DepartmentBudget, SimulatorHandle};
use super::services::{CheatCodeManager, HostServices, MessageServer, NotificationSink};

/// A department whose locally funded lists live in its own node arena
#[derive(Debug)]
pub struct InMemoryDepartment {
    id: DepartmentId,
    name: String,
    arena: NodeArena<ItemRef>,
    purposes: BTreeMap<PurposeId, HostList<ItemRef>>,
    line_items: BTreeMap<BuildingType, LineItem>,
}

impl InMemoryDepartment {
    /// Create an empty department
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            arena: NodeArena::new(),
            purposes: BTreeMap::new(),
            line_items: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> DepartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start tracking a purpose with no items
    pub fn add_purpose(&mut self, purpose: PurposeId) {
        self.purposes.entry(purpose).or_default();
    }

    /// Append a locally funded item to a purpose
    pub fn add_item(&mut self, purpose: PurposeId, item: ItemRef) -> NodeIndex {
        self.purposes
            .entry(purpose)
            .or_default()
            .push_back(&mut self.arena, item)
    }

    /// Add or replace a line item
    pub fn add_line_item(&mut self, line_item: LineItem) {
        self.line_items.insert(line_item.building_type, line_item);
    }

    /// Items recorded for a purpose, in list order
    pub fn items(&self, purpose: PurposeId) -> Vec<ItemRef> {
        self.purposes
            .get(&purpose)
            .map(|list| list.iter(&self.arena).cloned().collect())
            .unwrap_or_default()
    }

    /// Every tracked purpose with its items
    pub fn purposes(&self) -> Vec<(PurposeId, Vec<ItemRef>)> {
        self.purposes
            .iter()
            .map(|(purpose, list)| (*purpose, list.iter(&self.arena).cloned().collect()))
            .collect()
    }

    pub fn line_item(&self, building_type: BuildingType) -> Option<&LineItem> {
        self.line_items.get(&building_type)
    }

    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.values()
    }

    /// Total number of locally funded entries across purposes
    pub fn item_count(&self) -> usize {
        self.purposes.values().map(|list| list.len(&self.arena)).sum()
    }
}

impl DepartmentBudget for InMemoryDepartment {
    fn department_id(&self) -> DepartmentId {
        self.id
    }

    fn locally_funded_items_by_purpose(
        &self,
        purpose: PurposeId,
        out: &mut HostList<ItemRef>,
        allocator: &mut dyn NodeAllocator<ItemRef>,
    ) -> bool {
        let Some(list) = self.purposes.get(&purpose) else {
            return false;
        };

        for item in list.iter(&self.arena) {
            out.push_back(&mut *allocator, Rc::clone(item));
        }
        true
    }

    fn remove_locally_funded_object(&mut self, item: &LocallyFundedItem, purpose: PurposeId) -> bool {
        let Some(list) = self.purposes.get_mut(&purpose) else {
            return false;
        };
        let Some(handle) = list.find(&self.arena, |entry| entry.occupant_id == item.occupant_id) else {
            return false;
        };

        list.unlink(&mut self.arena, handle).is_ok()
    }

    fn remove_line_item(&mut self, building_type: BuildingType) -> bool {
        self.line_items.remove(&building_type).is_some()
    }
}

impl Drop for InMemoryDepartment {
    fn drop(&mut self) {
        for list in self.purposes.values_mut() {
            list.teardown(&mut self.arena);
        }
    }
}

/// Budget simulator holding departments by id
#[derive(Debug, Default)]
pub struct InMemoryBudgetSimulator {
    departments: BTreeMap<DepartmentId, InMemoryDepartment>,
}

impl InMemoryBudgetSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a department; each id may appear once
    pub fn insert_department(&mut self, department: InMemoryDepartment) -> PhantomResult<()> {
        if self.departments.contains_key(&department.id) {
            return Err(PhantomError::duplicate_department(department.id.to_string()));
        }
        self.departments.insert(department.id, department);
        Ok(())
    }

    pub fn department(&self, id: DepartmentId) -> Option<&InMemoryDepartment> {
        self.departments.get(&id)
    }

    pub fn department_mut(&mut self, id: DepartmentId) -> Option<&mut InMemoryDepartment> {
        self.departments.get_mut(&id)
    }

    /// Departments in id order
    pub fn departments(&self) -> impl Iterator<Item = &InMemoryDepartment> {
        self.departments.values()
    }
}

impl BudgetSimulator for InMemoryBudgetSimulator {
    fn department_budget(&mut self, department: DepartmentId) -> Option<&mut dyn DepartmentBudget> {
        self.departments
            .get_mut(&department)
            .map(|d| d as &mut dyn DepartmentBudget)
    }
}

/// Message server that records subscriptions
#[derive(Debug, Default)]
pub struct RecordingMessageServer {
    subscriptions: BTreeSet<(DirectorId, MessageId)>,
    refused: BTreeSet<MessageId>,
}

impl RecordingMessageServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the server refuse subscriptions to `message`
    pub fn refusing(mut self, message: MessageId) -> Self {
        self.refused.insert(message);
        self
    }

    pub fn is_subscribed(&self, director: DirectorId, message: MessageId) -> bool {
        self.subscriptions.contains(&(director, message))
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl MessageServer for RecordingMessageServer {
    fn add_notification(&mut self, director: DirectorId, message: MessageId) -> bool {
        if self.refused.contains(&message) {
            return false;
        }
        self.subscriptions.insert((director, message));
        true
    }

    fn remove_notification(&mut self, director: DirectorId, message: MessageId) -> bool {
        self.subscriptions.remove(&(director, message))
    }
}

/// Cheat code manager that records registrations
#[derive(Debug, Default)]
pub struct RecordingCheatCodeManager {
    listeners: BTreeSet<DirectorId>,
    cheats: BTreeMap<CheatId, String>,
}

impl RecordingCheatCodeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self, director: DirectorId) -> bool {
        self.listeners.contains(&director)
    }

    pub fn is_registered(&self, id: CheatId) -> bool {
        self.cheats.contains_key(&id)
    }

    /// Find the cheat whose string matches the first word of `text`
    pub fn match_cheat(&self, text: &str) -> Option<CheatId> {
        let name = text.split_whitespace().next()?;
        self.cheats
            .iter()
            .find(|(_, registered)| registered.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }
}

impl CheatCodeManager for RecordingCheatCodeManager {
    fn add_notification(&mut self, director: DirectorId) -> bool {
        self.listeners.insert(director);
        true
    }

    fn remove_notification(&mut self, director: DirectorId) -> bool {
        self.listeners.remove(&director)
    }

    fn register_cheat_code(&mut self, id: CheatId, text: &str) -> bool {
        self.cheats.insert(id, text.to_string());
        true
    }

    fn unregister_cheat_code(&mut self, id: CheatId) -> bool {
        self.cheats.remove(&id).is_some()
    }
}

/// A dialog the plugin asked the host to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub caption: String,
    pub message: String,
}

/// Notification sink that keeps every dialog
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    dialogs: Vec<Dialog>,
}

impl RecordingDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn last(&self) -> Option<&Dialog> {
        self.dialogs.last()
    }

    /// Remove and return the recorded dialogs
    pub fn take(&mut self) -> Vec<Dialog> {
        std::mem::take(&mut self.dialogs)
    }
}

impl NotificationSink for RecordingDialogs {
    fn show_dialog(&mut self, message: &str, caption: &str) {
        self.dialogs.push(Dialog {
            caption: caption.to_string(),
            message: message.to_string(),
        });
    }
}

/// An in-memory host application driving one director
///
/// Messages are only delivered when the director subscribed to them, and
/// cheats only when it is listening and the cheat is registered.
pub struct InMemoryHost {
    pub simulator: Rc<RefCell<InMemoryBudgetSimulator>>,
    pub message_server: RecordingMessageServer,
    pub cheat_codes: RecordingCheatCodeManager,
    pub dialogs: RecordingDialogs,
}

impl InMemoryHost {
    /// Create a host around a budget simulator
    pub fn new(simulator: InMemoryBudgetSimulator) -> Self {
        Self::with_message_server(simulator, RecordingMessageServer::new())
    }

    /// Create a host with a preconfigured message server
    pub fn with_message_server(
        simulator: InMemoryBudgetSimulator,
        message_server: RecordingMessageServer,
    ) -> Self {
        Self {
            simulator: Rc::new(RefCell::new(simulator)),
            message_server,
            cheat_codes: RecordingCheatCodeManager::new(),
            dialogs: RecordingDialogs::new(),
        }
    }

    /// Handle to the simulator as the director sees it
    pub fn simulator_handle(&self) -> SimulatorHandle {
        self.simulator.clone()
    }

    /// Run the director's post-application-init step
    pub fn start(&mut self, director: &mut PhantomBudgetDirector) -> PhantomResult<()> {
        director.post_app_init(Some(&mut self.message_server))
    }

    /// Announce that a city finished loading
    pub fn open_city(&mut self, director: &mut PhantomBudgetDirector) -> bool {
        let simulator = Some(self.simulator_handle());
        self.deliver(director, HostMessage::PostCityInit { simulator })
    }

    /// Announce that the city is shutting down
    pub fn close_city(&mut self, director: &mut PhantomBudgetDirector) -> bool {
        self.deliver(director, HostMessage::PostCityShutdown)
    }

    /// Type `text` into the cheat box
    ///
    /// Returns false when no registered cheat matched or the director was
    /// not listening.
    pub fn issue_cheat(&mut self, director: &mut PhantomBudgetDirector, text: &str) -> bool {
        let Some(cheat_id) = self.cheat_codes.match_cheat(text) else {
            return false;
        };
        if !self.cheat_codes.is_listening(director.director_id()) {
            return false;
        }

        let message = HostMessage::CheatIssued {
            cheat_id,
            text: text.to_string(),
        };
        director.do_message(message, HostServices::new(&mut self.cheat_codes, &mut self.dialogs))
    }

    fn deliver(&mut self, director: &mut PhantomBudgetDirector, message: HostMessage) -> bool {
        if !self
            .message_server
            .is_subscribed(director.director_id(), message.id())
        {
            return false;
        }
        director.do_message(message, HostServices::new(&mut self.cheat_codes, &mut self.dialogs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OccupantId, EXEMPLAR_TYPE};

    fn item(occupant: u32) -> ItemRef {
        Rc::new(LocallyFundedItem::new(OccupantId::new(occupant), BuildingType::new(occupant)))
    }

    #[test]
    fn test_department_fills_caller_list() {
        let purpose = PurposeId::new(1);
        let mut department = InMemoryDepartment::new(DepartmentId::new(1), "Fire");
        department.add_item(purpose, item(1));
        department.add_item(purpose, item(2));

        let mut arena = NodeArena::new();
        let mut list = HostList::new();
        assert!(department.locally_funded_items_by_purpose(purpose, &mut list, &mut arena));
        assert_eq!(list.len(&arena), 2);
        list.teardown(&mut arena);

        let mut empty = HostList::new();
        assert!(!department.locally_funded_items_by_purpose(PurposeId::new(2), &mut empty, &mut arena));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_remove_locally_funded_object() {
        let purpose = PurposeId::new(1);
        let mut department = InMemoryDepartment::new(DepartmentId::new(1), "Fire");
        let first = item(1);
        department.add_item(purpose, Rc::clone(&first));
        department.add_item(purpose, item(2));

        assert!(department.remove_locally_funded_object(&first, purpose));
        assert!(!department.remove_locally_funded_object(&first, purpose));
        assert!(!department.remove_locally_funded_object(&first, PurposeId::new(9)));
        assert_eq!(department.item_count(), 1);
        assert_eq!(Rc::strong_count(&first), 1);
    }

    #[test]
    fn test_remove_line_item() {
        let mut department = InMemoryDepartment::new(DepartmentId::new(1), "Fire");
        department.add_line_item(LineItem::new(BuildingType::new(5), "Station", 100));

        assert!(department.remove_line_item(BuildingType::new(5)));
        assert!(!department.remove_line_item(BuildingType::new(5)));
    }

    #[test]
    fn test_dropping_department_releases_items() {
        let shared = item(1);
        {
            let mut department = InMemoryDepartment::new(DepartmentId::new(1), "Fire");
            department.add_item(PurposeId::new(1), Rc::clone(&shared));
            department.add_item(PurposeId::new(2), Rc::clone(&shared));
            assert_eq!(Rc::strong_count(&shared), 3);
        }
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_duplicate_department_rejected() {
        let mut simulator = InMemoryBudgetSimulator::new();
        simulator
            .insert_department(InMemoryDepartment::new(DepartmentId::new(1), "A"))
            .unwrap();
        let err = simulator
            .insert_department(InMemoryDepartment::new(DepartmentId::new(1), "B"))
            .unwrap_err();
        assert!(matches!(err, PhantomError::Duplicate { .. }));
    }

    #[test]
    fn test_simulator_lookup_through_trait() {
        let mut simulator = InMemoryBudgetSimulator::new();
        simulator
            .insert_department(InMemoryDepartment::new(DepartmentId::new(1), "A"))
            .unwrap();

        assert!(simulator.department_budget(DepartmentId::new(1)).is_some());
        assert!(simulator.department_budget(DepartmentId::new(2)).is_none());
    }

    #[test]
    fn test_message_server_refusal() {
        let mut server = RecordingMessageServer::new().refusing(MessageId::new(2));
        let director = DirectorId::new(1);

        assert!(server.add_notification(director, MessageId::new(1)));
        assert!(!server.add_notification(director, MessageId::new(2)));
        assert!(server.is_subscribed(director, MessageId::new(1)));
        assert!(server.remove_notification(director, MessageId::new(1)));
        assert_eq!(server.subscription_count(), 0);
    }

    #[test]
    fn test_cheat_matching_ignores_case_and_arguments() {
        let mut cheats = RecordingCheatCodeManager::new();
        cheats.register_cheat_code(CheatId::new(7), "RemovePhantomBudgetItems");

        assert_eq!(cheats.match_cheat("removephantombudgetitems fire"), Some(CheatId::new(7)));
        assert_eq!(cheats.match_cheat("moolah"), None);
        assert_eq!(cheats.match_cheat("   "), None);

        cheats.unregister_cheat_code(CheatId::new(7));
        assert!(!cheats.is_registered(CheatId::new(7)));
    }

    #[test]
    fn test_recording_dialogs() {
        let mut dialogs = RecordingDialogs::new();
        dialogs.show_dialog("hello", "caption");

        assert_eq!(dialogs.last().unwrap().message, "hello");
        assert_eq!(dialogs.take().len(), 1);
        assert!(dialogs.all().is_empty());
    }

    #[test]
    fn test_items_keeps_marker_state() {
        let mut department = InMemoryDepartment::new(DepartmentId::new(1), "Fire");
        let installed = Rc::new(
            LocallyFundedItem::new(OccupantId::new(1), BuildingType::new(1)).with_property(EXEMPLAR_TYPE),
        );
        department.add_item(PurposeId::new(1), installed);

        assert!(department.items(PurposeId::new(1))[0].is_installed());
    }
}
