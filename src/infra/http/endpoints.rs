//! Backend endpoint paths, one constant per operation. Appended to the
//! configured base URL.

// Account
pub const LOGIN: &str = "/Account/Authenticate";
pub const GET_PROFILE: &str = "/Account/GetProfileSettings";
pub const CHANGE_PASSWORD: &str = "/Account/ChangePassword";
pub const FORGOT_PASSWORD: &str = "/Account/ForgotPassword";
pub const GET_USERS: &str = "/Account/GetUsers";
pub const CREATE_UPDATE_USER: &str = "/Account/CreateUpdateUser";
pub const DELETE_USER: &str = "/Account/DeleteUser";

// Roles
pub const GET_ROLES: &str = "/Role/GetRoles";

// Drivers
pub const GET_DRIVERS: &str = "/Driver/GetDrivers";
pub const GET_DRIVER: &str = "/Driver/GetDriver";
pub const CREATE_UPDATE_DRIVER: &str = "/Driver/CreateUpdateDriver";
pub const DELETE_DRIVER: &str = "/Driver/DeleteDriver";
pub const ASSIGN_DRIVER_VEHICLE: &str = "/Driver/AssignVehicle";
pub const UNASSIGN_DRIVER_VEHICLE: &str = "/Driver/UnassignVehicle";

// Vehicles
pub const GET_VEHICLES: &str = "/Vehicle/GetVehicles";
pub const GET_VEHICLE: &str = "/Vehicle/GetVehicle";
pub const CREATE_UPDATE_VEHICLE: &str = "/Vehicle/CreateUpdateVehicle";
pub const DELETE_VEHICLE: &str = "/Vehicle/DeleteVehicle";

// FOBs
pub const GET_FOBS: &str = "/FOB/GetFOBs";
pub const GET_FOB: &str = "/FOB/GetFOB";
pub const CREATE_UPDATE_FOB: &str = "/FOB/CreateUpdateFOB";
pub const DELETE_FOB: &str = "/FOB/DeleteFOB";
pub const ASSIGN_FOB_VEHICLE: &str = "/FOB/AssignVehicle";
pub const UNASSIGN_FOB_VEHICLE: &str = "/FOB/UnassignVehicle";

// Routes
pub const GET_ROUTES: &str = "/Route/GetRoutes";
pub const GET_ROUTE: &str = "/Route/GetRoute";
pub const CREATE_UPDATE_ROUTE: &str = "/Route/CreateUpdateRoute";
pub const DELETE_ROUTE: &str = "/Route/DeleteRoute";

// Trips
pub const GET_TRIPS: &str = "/Trip/GetTrips";
pub const GET_TRIP: &str = "/Trip/GetTrip";
pub const CREATE_UPDATE_TRIP: &str = "/Trip/CreateUpdateTrip";
pub const DELETE_TRIP: &str = "/Trip/DeleteTrip";
pub const ASSIGN_TRIP_DRIVER: &str = "/Trip/AssignDriver";

// Leads
pub const GET_LEADS: &str = "/Lead/GetLeads";
pub const GET_LEAD: &str = "/Lead/GetLead";
pub const CREATE_UPDATE_LEAD: &str = "/Lead/CreateUpdateLead";
pub const DELETE_LEAD: &str = "/Lead/DeleteLead";
pub const ASSIGN_LEAD_USER: &str = "/Lead/AssignLeadToUser";
pub const ADD_LEAD_FOLLOW_UP: &str = "/Lead/AddFollowUp";

// Projects and project lookups
pub const GET_PROJECTS: &str = "/Project/GetProjects";
pub const GET_PROJECT: &str = "/Project/GetProject";
pub const CREATE_UPDATE_PROJECT: &str = "/Project/CreateUpdateProject";
pub const DELETE_PROJECT: &str = "/Project/DeleteProject";
pub const GET_PROJECT_BLOCKS: &str = "/ProjectBlock/GetProjectBlocks";
pub const GET_PROJECT_STREETS: &str = "/ProjectStreet/GetProjectStreets";
pub const GET_PROJECT_ITEM_TYPES: &str = "/ProjectItemType/GetProjectItemTypes";
pub const GET_ITEM_CATEGORIES: &str = "/ItemCategory/GetItemCategories";
pub const GET_ITEM_SIZES: &str = "/ItemSize/GetItemSizes";
